//! Discovery document served at `/.well-known/farcaster.json`.

use serde::Serialize;

use crate::config::CatalogConfig;

pub const MANIFEST_PATH: &str = "/.well-known/farcaster.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountAssociationBlock {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSection {
    pub version: String,
    pub name: String,
    pub subtitle: String,
    pub description: String,
    pub icon_url: String,
    pub splash_image_url: String,
    pub splash_background_color: String,
    pub home_url: String,
    pub webhook_url: String,
    pub hero_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameManifest {
    pub account_association: AccountAssociationBlock,
    pub frame: FrameSection,
}

impl FrameManifest {
    pub fn from_config(config: &CatalogConfig) -> Self {
        let url = &config.app_url;
        let association = &config.account_association;
        Self {
            account_association: AccountAssociationBlock {
                header: association.header.clone(),
                payload: association.payload.clone(),
                signature: association.signature.clone(),
            },
            frame: FrameSection {
                version: "1".to_string(),
                name: "Hypercerts Mini App".to_string(),
                subtitle: "Hypercerts Marketplace".to_string(),
                description:
                    "Discover and manage your hypercerts seamlessly with our intuitive platform."
                        .to_string(),
                icon_url: format!("{}/icon.png", url),
                splash_image_url: format!("{}/base-logo-in-blue.jpg", url),
                splash_background_color: "#0000FF".to_string(),
                home_url: url.clone(),
                webhook_url: format!("{}/api/webhook", url),
                hero_image_url: format!("{}/base-logo-in-blue.jpg", url),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
