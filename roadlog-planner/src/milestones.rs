//! Merge pickup, fuel and dropoff stops into one ordered list.

use roadlog_core::{Milestone, MilestoneKind};

/// Inputs to [`plan_milestones`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MilestoneInputs {
    /// Mileage from the start to the pickup; zero when there is no pickup.
    pub start_to_pickup_miles: f64,
    /// Total route mileage.
    pub total_miles: f64,
    /// Spacing between fuel stops.
    pub fuel_interval_miles: u32,
    /// On-duty hours at the pickup and at the dropoff.
    pub service_hours: f64,
    /// On-duty hours at each fuel stop.
    pub fuel_stop_hours: f64,
}

/// Build the ascending milestone list for a route.
///
/// A pickup is added only when it lies beyond the start. Fuel stops sit at
/// every positive multiple of the interval strictly below the total. The
/// dropoff always closes the list. Stops at equal mileage keep insertion
/// order, so a pickup or fuel stop precedes a coinciding dropoff.
///
/// # Examples
/// ```
/// use roadlog_core::MilestoneKind;
/// use roadlog_planner::{MilestoneInputs, plan_milestones};
///
/// let milestones = plan_milestones(&MilestoneInputs {
///     start_to_pickup_miles: 50.0,
///     total_miles: 2500.0,
///     fuel_interval_miles: 1000,
///     service_hours: 1.0,
///     fuel_stop_hours: 0.25,
/// });
/// let kinds: Vec<_> = milestones.iter().map(|m| m.kind).collect();
/// assert_eq!(
///     kinds,
///     [MilestoneKind::Pickup, MilestoneKind::Fuel, MilestoneKind::Fuel, MilestoneKind::Dropoff]
/// );
/// ```
#[must_use]
pub fn plan_milestones(inputs: &MilestoneInputs) -> Vec<Milestone> {
    let mut milestones = Vec::new();
    if inputs.start_to_pickup_miles > 0.0 {
        milestones.push(Milestone::new(
            MilestoneKind::Pickup,
            inputs.start_to_pickup_miles,
            inputs.service_hours,
        ));
    }
    if inputs.fuel_interval_miles > 0 {
        let interval = f64::from(inputs.fuel_interval_miles);
        milestones.extend(
            (1..=u32::MAX)
                .map(|k| f64::from(k) * interval)
                .take_while(|miles| *miles < inputs.total_miles)
                .map(|miles| Milestone::new(MilestoneKind::Fuel, miles, inputs.fuel_stop_hours)),
        );
    }
    milestones.push(Milestone::new(
        MilestoneKind::Dropoff,
        inputs.total_miles,
        inputs.service_hours,
    ));
    milestones.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    milestones
}
