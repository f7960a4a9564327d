mod fragment;
mod primitives;
mod raster;
mod svg;

pub use fragment::Fragment;
pub use primitives::{CircleMark, LineMark, Mark, PathMark, RectMark, TextMark};
pub use raster::{NullRasterEncoder, RasterEncoder};
pub use svg::{fmt_num, write_document};
