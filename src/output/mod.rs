pub mod formatter;

pub use formatter::{
    format_record, format_rankings_table, format_title, format_tsv, should_use_colors,
};
