//! Records and sections.

use super::data::CellData;

/// One row of a sectioned list.
///
/// The type tag selects the cell class through the handler's type map. An
/// empty tag never resolves, so such a row renders collapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_tag: String,
    data: CellData,
    extra: CellData,
}

impl Record {
    /// Creates a record with a type tag and payload.
    pub fn new(type_tag: impl Into<String>, data: impl Into<CellData>) -> Self {
        Self {
            type_tag: type_tag.into(),
            data: data.into(),
            extra: CellData::None,
        }
    }

    /// Sets the secondary payload.
    pub fn with_extra(mut self, extra: impl Into<CellData>) -> Self {
        self.extra = extra.into();
        self
    }

    /// Returns the type tag.
    #[inline]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Returns the payload.
    #[inline]
    pub fn data(&self) -> &CellData {
        &self.data
    }

    /// Returns the secondary payload.
    #[inline]
    pub fn extra(&self) -> &CellData {
        &self.extra
    }
}

/// One section of a sectioned list.
///
/// Header and footer are optional and typed like records. The section's
/// `extra` payload is handed to both the header and the footer cell.
///
/// Sections are immutable once built. Reloading a list replaces the whole
/// section sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    header_type: Option<String>,
    header_data: CellData,
    footer_type: Option<String>,
    footer_data: CellData,
    extra: CellData,
    records: Vec<Record>,
}

impl Section {
    /// Creates an undecorated section holding `records`.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    /// Starts building a section.
    pub fn builder() -> SectionBuilder {
        SectionBuilder::default()
    }

    /// Returns the header type tag, if the section has a header.
    #[inline]
    pub fn header_type(&self) -> Option<&str> {
        self.header_type.as_deref()
    }

    /// Returns the header payload.
    #[inline]
    pub fn header_data(&self) -> &CellData {
        &self.header_data
    }

    /// Returns the footer type tag, if the section has a footer.
    #[inline]
    pub fn footer_type(&self) -> Option<&str> {
        self.footer_type.as_deref()
    }

    /// Returns the footer payload.
    #[inline]
    pub fn footer_data(&self) -> &CellData {
        &self.footer_data
    }

    /// Returns the section-level secondary payload.
    #[inline]
    pub fn extra(&self) -> &CellData {
        &self.extra
    }

    /// Returns the rows of this section in display order.
    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the row at `row`, if it exists.
    #[inline]
    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }
}

/// Builder for [`Section`].
#[derive(Debug, Clone, Default)]
pub struct SectionBuilder {
    section: Section,
}

impl SectionBuilder {
    /// Sets the header type tag and payload.
    pub fn header(mut self, type_tag: impl Into<String>, data: impl Into<CellData>) -> Self {
        self.section.header_type = Some(type_tag.into());
        self.section.header_data = data.into();
        self
    }

    /// Sets the footer type tag and payload.
    pub fn footer(mut self, type_tag: impl Into<String>, data: impl Into<CellData>) -> Self {
        self.section.footer_type = Some(type_tag.into());
        self.section.footer_data = data.into();
        self
    }

    /// Sets the section-level secondary payload.
    pub fn extra(mut self, extra: impl Into<CellData>) -> Self {
        self.section.extra = extra.into();
        self
    }

    /// Appends a row.
    pub fn record(mut self, record: Record) -> Self {
        self.section.records.push(record);
        self
    }

    /// Appends several rows.
    pub fn records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
        self.section.records.extend(records);
        self
    }

    /// Finishes the section.
    pub fn build(self) -> Section {
        self.section
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_defaults() {
        let record = Record::new("r1", json!({ "text": "x" }));
        assert_eq!(record.type_tag(), "r1");
        assert_eq!(record.data().str_field("text"), Some("x"));
        assert!(record.extra().is_none());
    }

    #[test]
    fn test_plain_section_has_no_decorations() {
        let section = Section::new(vec![Record::new("r1", CellData::None)]);
        assert!(section.header_type().is_none());
        assert!(section.footer_type().is_none());
        assert_eq!(section.records().len(), 1);
        assert!(section.record(1).is_none());
    }

    #[test]
    fn test_section_builder() {
        let section = Section::builder()
            .header("h2", json!({ "title": "B" }))
            .footer("f2", json!({ "footerTitle": "end" }))
            .extra("section-extra")
            .records([Record::new("r1", CellData::None), Record::new("r2", CellData::None)])
            .build();

        assert_eq!(section.header_type(), Some("h2"));
        assert_eq!(section.footer_type(), Some("f2"));
        assert_eq!(section.footer_data().str_field("footerTitle"), Some("end"));
        assert_eq!(section.extra().as_str(), Some("section-extra"));
        assert_eq!(section.record(1).map(Record::type_tag), Some("r2"));
    }
}
