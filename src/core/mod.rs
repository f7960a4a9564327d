pub mod layout_math;
pub mod legend;
pub mod scale;
pub mod series;
pub mod table;
pub mod types;

pub use legend::{LegendPosition, TextLegend};
pub use scale::LinearScale;
pub use series::{Series, SeriesKind, SeriesParams};
pub use table::{Table, TableStyles};
pub use types::{DataPoint, HexColor};
