//! Queue position and wait estimation for same-day appointments.

use shared_utils::{parse_clock_time, TimeParseError};

use crate::error::AppointmentError;
use crate::models::Appointment;

pub const DEFAULT_CONSULTATION_MINUTES: u32 = 20;

/// Computes the 1-based position of `target` among appointments with the
/// same doctor on the same calendar day, ordered by time slot.
///
/// The sort is stable, so two appointments sharing a slot keep their input
/// order; that tie-break is part of the contract, not an accident of the
/// sort. A slot that fails to parse propagates as an error because a
/// defaulted time would reorder the queue silently.
pub fn queue_position(
    target: &Appointment,
    all: &[Appointment],
) -> Result<usize, AppointmentError> {
    let mut same_day: Vec<(&Appointment, u32)> = all
        .iter()
        .filter(|appt| appt.doctor_id == target.doctor_id && appt.date == target.date)
        .map(|appt| Ok((appt, parse_clock_time(&appt.time_slot)?)))
        .collect::<Result<_, TimeParseError>>()?;

    same_day.sort_by_key(|(_, minutes)| *minutes);

    same_day
        .iter()
        .position(|(appt, _)| appt.id == target.id)
        .map(|index| index + 1)
        .ok_or_else(|| AppointmentError::NotFound(target.id.clone()))
}

/// Estimated wait in minutes for a given queue position.
///
/// Position 1 is the patient being served and always waits zero. The flat
/// per-patient average is a deliberate simplification: it ignores each
/// doctor's actual pace, priority overrides, and the remaining time of the
/// in-progress consultation.
pub fn estimate_wait_minutes(position: usize, avg_consultation_minutes: u32) -> u32 {
    position.saturating_sub(1) as u32 * avg_consultation_minutes
}
