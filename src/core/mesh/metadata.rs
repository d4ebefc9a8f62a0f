use std::collections::BTreeMap;

use crate::core::attribute::AttributeId;

/// A key-value store attached to a geometry or to one of its attributes.
/// Keys and values are raw bytes; most producers store UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
    sub_metadata: BTreeMap<Vec<u8>, Metadata>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get_entry(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns the entry as text, if it is valid UTF-8.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get_entry(key.as_bytes())
            .and_then(|v| std::str::from_utf8(v).ok())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    pub fn add_sub_metadata(&mut self, key: impl Into<Vec<u8>>, metadata: Metadata) {
        self.sub_metadata.insert(key.into(), metadata);
    }

    pub fn get_sub_metadata(&self, key: &[u8]) -> Option<&Metadata> {
        self.sub_metadata.get(key)
    }

    pub fn sub_metadata(&self) -> impl Iterator<Item = (&[u8], &Metadata)> {
        self.sub_metadata.iter().map(|(k, v)| (k.as_slice(), v))
    }

    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn num_sub_metadata(&self) -> usize {
        self.sub_metadata.len()
    }
}

/// Metadata of a whole geometry together with the metadata of its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeometryMetadata {
    pub(crate) metadata: Metadata,
    pub(crate) attribute_metadata: Vec<(AttributeId, Metadata)>,
}

impl GeometryMetadata {
    pub fn new(metadata: Metadata) -> Self {
        Self { metadata, attribute_metadata: Vec::new() }
    }

    pub fn geometry(&self) -> &Metadata {
        &self.metadata
    }

    pub fn add_attribute_metadata(&mut self, id: AttributeId, metadata: Metadata) {
        self.attribute_metadata.push((id, metadata));
    }

    pub fn get_attribute_metadata(&self, id: AttributeId) -> Option<&Metadata> {
        self.attribute_metadata.iter()
            .find(|(att_id, _)| *att_id == id)
            .map(|(_, m)| m)
    }

    pub fn attribute_metadata(&self) -> &[(AttributeId, Metadata)] {
        &self.attribute_metadata
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_and_sub_metadata() {
        let mut m = Metadata::new();
        m.add_entry("name", "bunny");
        m.add_entry(vec![0xff], vec![1, 2]);
        let mut sub = Metadata::new();
        sub.add_entry("unit", "m");
        m.add_sub_metadata("scale", sub.clone());

        assert_eq!(m.get_str("name"), Some("bunny"));
        assert_eq!(m.get_entry(&[0xff]), Some(&[1u8, 2][..]));
        assert_eq!(m.get_str("missing"), None);
        assert_eq!(m.get_sub_metadata(b"scale"), Some(&sub));
        assert_eq!(m.num_entries(), 2);
        assert_eq!(m.num_sub_metadata(), 1);
    }

    #[test]
    fn attribute_metadata_lookup() {
        let mut g = GeometryMetadata::new(Metadata::new());
        let mut m = Metadata::new();
        m.add_entry("name", "uv0");
        g.add_attribute_metadata(AttributeId::new(4), m);
        assert_eq!(g.get_attribute_metadata(AttributeId::new(4)).and_then(|m| m.get_str("name")), Some("uv0"));
        assert!(g.get_attribute_metadata(AttributeId::new(0)).is_none());
    }
}
