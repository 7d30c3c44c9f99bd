//! Output assembly and the two import file writers.

pub mod assembler;
pub mod csv_writer;
pub mod selection;
pub mod xlsx_writer;

pub use assembler::{OutputAssembler, SALE_GOODS_MARKER, SALE_GOODS_SUFFIX};
pub use csv_writer::render_csv;
pub use selection::{parse_row_ranges, Assignment, RowSelection};
pub use xlsx_writer::{render_xlsx, SheetLayout};
