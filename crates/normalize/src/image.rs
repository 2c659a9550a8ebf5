//! Image candidate normalization.
//!
//! Every image-bearing field is a list of differently sized candidates. They
//! are turned into [`Image`] descriptors with absolute URLs and ordered widest
//! first, so index 0 is always the best candidate.
use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;
use crate::origin::Origin;

/// One raw candidate as the service sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// A normalized image descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Resolves candidate URLs and orders candidates by width, widest first.
///
/// Candidates without a URL are dropped. Equal widths keep their input order.
pub fn prep_images(
    candidates: &[ImageCandidate],
    origin: &Origin,
) -> Result<Vec<Image>, NormalizeError> {
    let mut images = candidates
        .iter()
        .filter_map(|candidate| {
            candidate.url.as_deref().map(|url| {
                origin.resolve(url).map(|url| Image {
                    url,
                    width: candidate.width,
                    height: candidate.height,
                })
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    images.sort_by(|a, b| b.width.cmp(&a.width));
    Ok(images)
}

/// Best image of an already ordered list.
pub(crate) fn best(images: &[Image]) -> Option<Image> {
    images.first().cloned()
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn origin() -> Origin {
        Origin::new(Url::parse("https://www.youtube.com/").expect("static base url parses"))
    }

    fn candidate(url: Option<&str>, width: u32) -> ImageCandidate {
        ImageCandidate {
            url: url.map(str::to_string),
            width,
            height: width / 2,
        }
    }

    #[test]
    fn widest_first_with_absolute_urls() {
        let images = prep_images(
            &[
                candidate(Some("//i.ytimg.com/small.jpg"), 120),
                candidate(Some("https://i.ytimg.com/large.jpg"), 720),
                candidate(Some("//i.ytimg.com/medium.jpg"), 320),
            ],
            &origin(),
        )
        .expect("images normalize");

        let urls: Vec<&str> = images.iter().map(|img| img.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://i.ytimg.com/large.jpg",
                "https://i.ytimg.com/medium.jpg",
                "https://i.ytimg.com/small.jpg",
            ]
        );
        assert_eq!(best(&images), images.first().cloned());
    }

    #[test]
    fn candidates_without_url_dropped() {
        let images = prep_images(&[candidate(None, 720), candidate(Some("/a.jpg"), 10)], &origin())
            .expect("images normalize");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].url, "https://www.youtube.com/a.jpg");
    }

    #[test]
    fn empty_list_has_no_best() {
        let images = prep_images(&[], &origin()).expect("images normalize");
        assert!(images.is_empty());
        assert_eq!(best(&images), None);
    }
}
