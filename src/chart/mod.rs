/// Chart builders: pure transformations from the dataset and the current
/// selection into chart descriptions that the UI layer draws.

use std::sync::Arc;

pub mod pie;
pub mod scatter;

pub use pie::{PieChart, build_pie};
pub use scatter::{ScatterChart, build_scatter};

/// Whatever currently occupies a dashboard slot. The scatter is shared with
/// the plot's hover formatter, so it sits behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Pie(PieChart),
    Scatter(Arc<ScatterChart>),
}
