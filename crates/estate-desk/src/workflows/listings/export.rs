use super::repository::CatalogCard;

/// Render a catalog slice as CSV for download.
///
/// Photos are collapsed to a count; the references themselves are opaque
/// handles with no value in a spreadsheet.
pub fn catalog_csv(cards: &[CatalogCard]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "title",
        "price",
        "city",
        "district",
        "rooms",
        "view",
        "property_type",
        "pool",
        "location_url",
        "photo_count",
    ])?;

    for card in cards {
        let photo_count = card.photos.len().to_string();
        writer.write_record([
            card.id.0.as_str(),
            card.title.as_str(),
            card.price.as_str(),
            card.city.as_str(),
            card.district.as_str(),
            card.rooms.as_str(),
            card.view.as_str(),
            card.property_type.as_str(),
            card.pool.as_str(),
            card.location_url.as_deref().unwrap_or(""),
            photo_count.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Render(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Render(err.to_string()))
}

/// Error raised while rendering the export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv export failed: {0}")]
    Render(String),
}
