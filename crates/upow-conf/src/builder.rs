use crate::sources::{ConfigSource, SourceError};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Merges sources by ascending priority; later (higher) sources win per key.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merge every source into one flat map
	pub fn build(mut self) -> Result<IndexMap<String, Value>, SourceError> {
		// stable sort keeps insertion order between equal priorities
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = IndexMap::new();
		for source in &self.sources {
			let values = source.load()?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"loaded settings source"
			);
			merged.extend(values);
		}
		Ok(merged)
	}

	/// Merge and deserialize into a typed settings struct
	pub fn build_typed<T: DeserializeOwned>(self) -> Result<T, SourceError> {
		let merged = self.build()?;
		let object: serde_json::Map<String, Value> = merged.into_iter().collect();
		Ok(serde_json::from_value(Value::Object(object))?)
	}
}
