//! Persistence boundary. One pooled acquire per operation, runtime-bound
//! queries, no transactions spanning user interaction.

pub mod adjustments;
pub mod attendance;
pub mod brackets;
pub mod employees;
pub mod holds;
pub mod payrolls;
pub mod positions;
pub mod shifts;
