//! Validation serializers

use super::workflow::ValidationPreview;
use crate::apps::profile::serializers::PublicProfileResponse;
use crate::apps::work::serializers::WorkEntryResponse;
use serde::{Deserialize, Serialize};

/// Response of the review step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationPreviewResponse {
	pub entry: WorkEntryResponse,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub owner: Option<PublicProfileResponse>,
}

impl From<&ValidationPreview> for ValidationPreviewResponse {
	fn from(preview: &ValidationPreview) -> Self {
		Self {
			entry: WorkEntryResponse::from(&preview.entry),
			owner: preview.owner.as_ref().map(PublicProfileResponse::from),
		}
	}
}
