//! Test utilities for parquet-frame

#[cfg(test)]
pub mod test {
    use crate::frame::{Column, Frame};

    /// A small frame covering the common storage kinds, with one missing
    /// value per column.
    pub fn sample_frame() -> Frame {
        let mut frame = Frame::new();
        frame
            .push_column("id", Column::Int32(vec![Some(1), Some(2), None, Some(4)]))
            .unwrap();
        frame
            .push_column(
                "name",
                Column::Utf8(vec![
                    Some("alice".to_string()),
                    None,
                    Some("carol".to_string()),
                    Some("dave".to_string()),
                ]),
            )
            .unwrap();
        frame
            .push_column(
                "score",
                Column::Float64(vec![Some(91.5), Some(78.25), Some(64.0), None]),
            )
            .unwrap();
        frame
            .push_column(
                "active",
                Column::Boolean(vec![Some(true), Some(false), None, Some(true)]),
            )
            .unwrap();
        frame
    }

    /// Logical type names parallel to [`sample_frame`]'s columns.
    pub fn sample_logical_types() -> Vec<&'static str> {
        vec!["integer", "character", "numeric", "logical"]
    }
}
