//! Photo album model matching the backend gallery directory.

use serde::{Deserialize, Serialize};

use super::content::{identifier, nullable_string, AssetResolver, ContentItem, ContentKind};

/// A gallery album with its photos in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    #[serde(deserialize_with = "identifier")]
    pub album_number: String,
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub date: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
}

impl ContentItem for Album {
    const KIND: ContentKind = ContentKind::Album;

    fn identifier(&self) -> &str {
        &self.album_number
    }

    fn resolve_assets(&mut self, assets: &AssetResolver) {
        assets.resolve_in_place(&mut self.cover_image);
        for photo in &mut self.photos {
            *photo = assets.resolve(photo);
        }
    }
}

/// Body of `GET /get_photo_albums`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumCollection {
    #[serde(default)]
    pub albums: Vec<Album>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photos_keep_order_when_resolved() {
        let mut album: Album = serde_json::from_value(serde_json::json!({
            "album_number": "1",
            "title": "Field visit",
            "date": "2024-01-10",
            "cover_image": "/static/gallery/album_1_cover.jpg",
            "photos": ["/static/gallery/album_1_photo_0.jpg", "/static/gallery/album_1_photo_1.jpg"]
        }))
        .unwrap();

        album.resolve_assets(&AssetResolver::new("http://b"));
        assert_eq!(
            album.photos,
            vec![
                "http://b/static/gallery/album_1_photo_0.jpg".to_string(),
                "http://b/static/gallery/album_1_photo_1.jpg".to_string()
            ]
        );
        assert_eq!(
            album.cover_image.as_deref(),
            Some("http://b/static/gallery/album_1_cover.jpg")
        );
    }
}
