//! `pk-planner` — single-agent time-expanded A* planning.

pub mod astar;


pub use astar::{AStarPlanner, Planner};
