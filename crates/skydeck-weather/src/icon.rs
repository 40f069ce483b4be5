//! Weather code → icon lookup and download.

use crate::types::{IconAsset, IconKind, WeatherError};
use reqwest::Client;

/// Code whose entry is used for every code missing from the table.
pub const DEFAULT_ICON_CODE: i32 = 2;

struct IconEntry {
    code: i32,
    kind: IconKind,
    file: &'static str,
}

static SUNNY: IconEntry = IconEntry {
    code: 0,
    kind: IconKind::Sunny,
    file: "01d@2x.png",
};

static PARTLY_CLOUDY: IconEntry = IconEntry {
    code: 1,
    kind: IconKind::PartlyCloudy,
    file: "02d@2x.png",
};

/// Used for every code missing from the table.
static DEFAULT_ENTRY: IconEntry = IconEntry {
    code: DEFAULT_ICON_CODE,
    kind: IconKind::Cloudy,
    file: "03d@2x.png",
};

static RAINING: IconEntry = IconEntry {
    code: 3,
    kind: IconKind::Raining,
    file: "09d@2x.png",
};

static ICON_TABLE: [&IconEntry; 4] = [&SUNNY, &PARTLY_CLOUDY, &DEFAULT_ENTRY, &RAINING];

fn entry_for(code: i32) -> &'static IconEntry {
    ICON_TABLE
        .iter()
        .copied()
        .find(|e| e.code == code)
        .unwrap_or(&DEFAULT_ENTRY)
}

impl IconKind {
    /// Icon category for a weather code, falling back to the default entry
    pub fn for_code(code: i32) -> Self {
        entry_for(code).kind
    }
}

/// Downloads icons from `{base_url}/{file}`.
#[derive(Debug, Clone)]
pub struct IconResolver {
    client: Client,
    base_url: String,
}

impl IconResolver {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Full icon URL for a weather code
    pub fn url_for(&self, code: i32) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            entry_for(code).file
        )
    }

    /// Download and decode the icon for `code`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success status codes, and bytes that
    /// are not a supported image.
    pub async fn fetch(&self, code: i32) -> Result<IconAsset, WeatherError> {
        let url = self.url_for(code);
        tracing::debug!("Fetching icon {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        decode_icon(IconKind::for_code(code), &bytes)
    }

    /// Like [`IconResolver::fetch`], but logs the failure and returns `None`
    pub async fn resolve(&self, code: i32) -> Option<IconAsset> {
        match self.fetch(code).await {
            Ok(icon) => {
                tracing::debug!(
                    "Icon for weather code {}: {}",
                    code,
                    icon.kind.description()
                );
                Some(icon)
            }
            Err(e) => {
                tracing::warn!("Icon for weather code {} unavailable: {}", code, e);
                None
            }
        }
    }
}

fn decode_icon(kind: IconKind, bytes: &[u8]) -> Result<IconAsset, WeatherError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| WeatherError::Image(e.to_string()))?
        .to_rgba8();

    Ok(IconAsset {
        kind,
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> IconResolver {
        IconResolver::new(Client::new(), "https://openweathermap.org/img/wn")
    }

    #[test]
    fn test_known_codes_select_their_url() {
        let icons = resolver();
        assert_eq!(icons.url_for(0), "https://openweathermap.org/img/wn/01d@2x.png");
        assert_eq!(icons.url_for(1), "https://openweathermap.org/img/wn/02d@2x.png");
        assert_eq!(icons.url_for(2), "https://openweathermap.org/img/wn/03d@2x.png");
        assert_eq!(icons.url_for(3), "https://openweathermap.org/img/wn/09d@2x.png");
    }

    #[test]
    fn test_unknown_codes_fall_back_to_default() {
        let icons = resolver();
        let fallback = icons.url_for(DEFAULT_ICON_CODE);
        for code in [4, 45, 61, 99, -1, i32::MAX] {
            assert_eq!(icons.url_for(code), fallback, "code {}", code);
        }
    }

    #[test]
    fn test_icon_kind_for_code() {
        assert_eq!(IconKind::for_code(0), IconKind::Sunny);
        assert_eq!(IconKind::for_code(1), IconKind::PartlyCloudy);
        assert_eq!(IconKind::for_code(2), IconKind::Cloudy);
        assert_eq!(IconKind::for_code(3), IconKind::Raining);
        assert_eq!(IconKind::for_code(99), IconKind::Cloudy);
    }

    #[test]
    fn test_default_entry_is_in_table() {
        let defaults: Vec<_> = ICON_TABLE
            .iter()
            .filter(|e| e.code == DEFAULT_ICON_CODE)
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].file, DEFAULT_ENTRY.file);
        assert_eq!(entry_for(1000).code, DEFAULT_ICON_CODE);
    }

    #[test]
    fn test_icon_descriptions() {
        assert_eq!(IconKind::for_code(0).description(), "Sunny");
        assert_eq!(IconKind::for_code(1).description(), "Partly cloudy");
        assert_eq!(IconKind::for_code(99).description(), "Cloudy");
        assert_eq!(IconKind::for_code(3).description(), "Raining");
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let icons = IconResolver::new(Client::new(), "http://localhost:9000/icons/");
        assert_eq!(icons.url_for(3), "http://localhost:9000/icons/09d@2x.png");
    }

    #[test]
    fn test_decode_png() {
        let mut png = Vec::new();
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let icon = decode_icon(IconKind::Raining, &png).unwrap();
        assert_eq!(icon.kind, IconKind::Raining);
        assert_eq!((icon.width, icon.height), (3, 2));
        assert_eq!(icon.rgba.len(), 3 * 2 * 4);
        assert_eq!(&icon.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_icon(IconKind::Sunny, b"not an image"),
            Err(WeatherError::Image(_))
        ));
    }
}
