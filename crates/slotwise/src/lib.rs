//! # slotwise
//!
//! Deterministic availability resolution and recurring-session planning for
//! tutoring calendars.
//!
//! Given an instructor's recurring weekly availability, the sessions already
//! booked against it, and a student's day/time/duration preferences, slotwise
//! computes the open time windows for each visible week, materializes a
//! sequence of proposed recurring session blocks, and lets a caller shift or
//! resize individual blocks while keeping the weekly pattern consistent
//! across later weeks.
//!
//! The engine is synchronous, pure computation over in-memory inputs. It
//! operates on local calendar dates and minutes-of-day only; fetching rules
//! and bookings, caching, and local⇄UTC conversion are the host's concern.
//!
//! ## Modules
//!
//! - [`interval`] — minute-of-day interval arithmetic on a single day
//! - [`availability`] — weekly availability rules minus busy intervals → free slots
//! - [`recurrence`] — anchor + weekday set + target count → planned occurrence dates
//! - [`materialize`] — planned dates → proposed blocks (default / pattern / override)
//! - [`credit`] — remaining-minute balance check before submission
//! - [`session`] — per-attempt state object and the visible-range query facade
//! - [`error`] — error types

pub mod availability;
pub mod credit;
pub mod error;
pub mod interval;
pub mod materialize;
pub mod recurrence;
pub mod session;

pub use availability::{resolve_week, BusyInterval, FreeSlot, WeeklyAvailabilityRule};
pub use credit::{check, CreditBalance, CreditCheck};
pub use error::ScheduleError;
pub use interval::MinuteSpan;
pub use materialize::{materialize, ProposedBlock, SessionPreference};
pub use recurrence::{plan, PlannedOccurrence};
pub use session::{proposed_minutes, Block, DateRange, SchedulingSession, VisibleBlocksRequest};
