//! Validation of caller-supplied weekly schedules.

use clout_types::{Platform, WeeklySchedule};

use crate::config::ScheduleLimits;
use crate::error::ScheduleError;

/// Check a schedule against the configured bounds.
///
/// A full-rest week must list no hours. A working week may not exceed
/// `max_hours` on any platform and needs at least `min_active_platforms`
/// entries at or above `min_hours`.
pub fn validate(schedule: &WeeklySchedule, limits: &ScheduleLimits) -> Result<(), ScheduleError> {
    if schedule.full_rest {
        let hours = schedule.total_hours();
        if hours > 0 {
            return Err(ScheduleError::RestWithHours { hours });
        }
        return Ok(());
    }

    for (platform, &hours) in &schedule.hours {
        if hours > limits.max_hours {
            return Err(ScheduleError::TooManyHours {
                platform: *platform,
                hours,
                max: limits.max_hours,
            });
        }
    }

    let active = active_platform_count(schedule, limits);
    if active < limits.min_active_platforms {
        return Err(ScheduleError::TooFewPlatforms {
            active,
            required: limits.min_active_platforms,
        });
    }
    Ok(())
}

/// Entries that count toward the model: at or above `min_hours`.
pub fn counted_entries<'a>(
    schedule: &'a WeeklySchedule,
    limits: &'a ScheduleLimits,
) -> impl Iterator<Item = (Platform, u32)> + 'a {
    schedule
        .hours
        .iter()
        .filter(move |(_, h)| **h >= limits.min_hours)
        .map(|(p, h)| (*p, *h))
}

/// The allocation used for agents without a supplied schedule.
pub fn default_schedule(platform: Platform, weekly_hours: u32) -> WeeklySchedule {
    WeeklySchedule::single(platform, weekly_hours)
}

fn active_platform_count(schedule: &WeeklySchedule, limits: &ScheduleLimits) -> u32 {
    let count = counted_entries(schedule, limits).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}
