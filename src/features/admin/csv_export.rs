use csv::{QuoteStyle, WriterBuilder};

use crate::error::AppError;
use crate::store::Submission;

/// 导出表头（顺序固定）
pub const CSV_HEADER: [&str; 8] = [
    "id",
    "name",
    "phone",
    "email",
    "household",
    "kids",
    "timestamp",
    "source",
];

/// 将记录渲染为 CSV：表头不加引号，数据行每个值都加双引号，值内引号成对转义。
pub fn render_csv(rows: &[Submission]) -> Result<Vec<u8>, AppError> {
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());
    header.write_record(CSV_HEADER)?;
    let buf = header
        .into_inner()
        .map_err(|e| AppError::Internal(format!("csv flush: {}", e.error())))?;

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(buf);
    for s in rows {
        wtr.write_record([
            s.id_text().as_str(),
            s.name.as_str(),
            s.phone.as_deref().unwrap_or(""),
            s.email.as_deref().unwrap_or(""),
            s.household.as_deref().unwrap_or(""),
            if s.kids { "true" } else { "false" },
            s.timestamp.as_str(),
            s.source.as_str(),
        ])?;
    }
    wtr.into_inner()
        .map_err(|e| AppError::Internal(format!("csv flush: {}", e.error())))
}
