//! A car's current objective class.

/// What a car is currently trying to do.
///
/// Transitions are explicit and driven by the scheduler's failure
/// escalation policy (repeated PARK failure converts to EXIT); there is no
/// open-ended intent hierarchy to model, so a closed enum is preferable to
/// trait-object polymorphism here.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Intent {
    Park,
    Exit,
    None,
}
