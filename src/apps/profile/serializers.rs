//! Profile serializers

use super::models::Profile;
use crate::apps::work::serializers::WorkEntryResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile as seen by its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
	pub id: String,
	pub name: String,
	pub email: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bio: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileResponse {
	fn from(profile: &Profile) -> Self {
		Self {
			id: profile.id.clone(),
			name: profile.name.clone(),
			email: profile.email.clone(),
			role: profile.role.clone(),
			bio: profile.bio.clone(),
			created_at: profile.created_at,
			updated_at: profile.updated_at,
		}
	}
}

/// Profile as shown to anyone. The email is left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileResponse {
	pub id: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bio: Option<String>,
	pub created_at: DateTime<Utc>,
}

impl From<&Profile> for PublicProfileResponse {
	fn from(profile: &Profile) -> Self {
		Self {
			id: profile.id.clone(),
			name: profile.name.clone(),
			role: profile.role.clone(),
			bio: profile.bio.clone(),
			created_at: profile.created_at,
		}
	}
}

/// Public profile page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfilePage {
	pub profile: PublicProfileResponse,
	pub entries: Vec<WorkEntryResponse>,
	pub validated_count: usize,
	pub share_url: String,
}
