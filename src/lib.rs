//! sysgauge - Terminal resource monitor library.
//!
//! Samples CPU, memory and disk utilization of the local host and renders
//! them as colored gauges. The library is shared between the `sysgauge`
//! binary and the tests:
//! - `collector` - raw source readers and the three collectors
//! - `rates` - derivation of percentages from raw readings
//! - `monitor` - polling driver producing one report per cycle
//! - `render` - terminal output

pub mod collector;
pub mod fmt;
pub mod model;
pub mod monitor;
pub mod rates;
pub mod render;
pub mod shutdown;
