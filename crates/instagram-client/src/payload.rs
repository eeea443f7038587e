//! Mapping the metadata JSON into media items.
//!
//! Two shapes are seen in the wild:
//! - GraphQL: `graphql.shortcode_media`, with `edge_sidecar_to_children` for carousels.
//! - Items: `items[]` with numeric `media_type` (1 photo, 2 video, 8 carousel).

use crate::error::InstagramError;
use crate::media::MediaItem;
use serde::Deserialize;
use serde_json::Value;

const MEDIA_TYPE_PHOTO: i64 = 1;
const MEDIA_TYPE_VIDEO: i64 = 2;
const MEDIA_TYPE_CAROUSEL: i64 = 8;

#[derive(Debug, Deserialize)]
struct Payload {
    graphql: Option<Graphql>,
    items: Option<Vec<ApiItem>>,
}

#[derive(Debug, Deserialize)]
struct Graphql {
    shortcode_media: Option<GraphNode>,
}

#[derive(Debug, Deserialize)]
struct GraphNode {
    is_video: Option<bool>,
    video_url: Option<String>,
    display_url: Option<String>,
    display_resources: Option<Vec<DisplayResource>>,
    edge_sidecar_to_children: Option<SidecarEdges>,
    edge_media_to_caption: Option<CaptionEdges>,
}

#[derive(Debug, Deserialize)]
struct DisplayResource {
    src: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SidecarEdges {
    edges: Option<Vec<Option<SidecarEdge>>>,
}

/// `node` stays raw so that empty `{}` children can be told apart from real ones.
#[derive(Debug, Deserialize)]
struct SidecarEdge {
    node: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CaptionEdges {
    edges: Option<Vec<CaptionEdge>>,
}

#[derive(Debug, Deserialize)]
struct CaptionEdge {
    node: Option<CaptionText>,
}

#[derive(Debug, Deserialize)]
struct CaptionText {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiItem {
    media_type: Option<i64>,
    image_versions2: Option<ImageVersions>,
    video_versions: Option<Vec<VersionUrl>>,
    carousel_media: Option<Vec<ApiItem>>,
    caption: Option<CaptionText>,
    edge_media_to_caption: Option<CaptionEdges>,
}

#[derive(Debug, Deserialize)]
struct ImageVersions {
    candidates: Option<Vec<VersionUrl>>,
}

#[derive(Debug, Deserialize)]
struct VersionUrl {
    url: Option<String>,
}

fn non_empty(text: Option<&String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty()).cloned()
}

fn edge_caption(edges: Option<&CaptionEdges>) -> Option<String> {
    let first = edges?.edges.as_ref()?.first()?;
    non_empty(first.node.as_ref()?.text.as_ref())
}

/// Maps the metadata document into media items: GraphQL shape first, items shape as fallback.
///
/// An empty vector means neither shape carried media. A GraphQL node that claims to be a video
/// without `video_url`, or a photo without any image URL, fails the whole post.
pub fn parse_media_payload(value: &Value) -> Result<Vec<MediaItem>, InstagramError> {
    let payload = Payload::deserialize(value).map_err(|_| InstagramError::InvalidResponse)?;

    let media = parse_graphql(&payload)?;
    if !media.is_empty() {
        return Ok(media);
    }
    Ok(payload
        .items
        .as_deref()
        .map(|items| parse_items(items, None))
        .unwrap_or_default())
}

fn parse_graphql(payload: &Payload) -> Result<Vec<MediaItem>, InstagramError> {
    let Some(media) = payload
        .graphql
        .as_ref()
        .and_then(|g| g.shortcode_media.as_ref())
    else {
        return Ok(Vec::new());
    };

    let caption = edge_caption(media.edge_media_to_caption.as_ref());

    // A sidecar object without `edges` is not a carousel; the node itself is the media.
    if let Some(edges) = media
        .edge_sidecar_to_children
        .as_ref()
        .and_then(|sidecar| sidecar.edges.as_ref())
    {
        return edges
            .iter()
            .flatten()
            .filter_map(|edge| edge.node.as_ref())
            .filter(|node| matches!(node, Value::Object(fields) if !fields.is_empty()))
            .map(|node| {
                let node =
                    GraphNode::deserialize(node).map_err(|_| InstagramError::InvalidResponse)?;
                node_to_media_item(&node, caption.clone())
            })
            .collect();
    }

    Ok(vec![node_to_media_item(media, caption)?])
}

fn node_to_media_item(node: &GraphNode, caption: Option<String>) -> Result<MediaItem, InstagramError> {
    if node.is_video.unwrap_or(false) {
        let url = non_empty(node.video_url.as_ref()).ok_or(InstagramError::MissingVideoUrl)?;
        return Ok(MediaItem::video(url, caption));
    }

    let url = non_empty(node.display_url.as_ref())
        .or_else(|| {
            node.display_resources
                .as_ref()
                .and_then(|resources| resources.last())
                .and_then(|r| non_empty(r.src.as_ref()))
        })
        .ok_or(InstagramError::MissingImageUrl)?;
    Ok(MediaItem::photo(url, caption))
}

fn first_url(versions: Option<&Vec<VersionUrl>>) -> Option<String> {
    versions?.first().and_then(|v| non_empty(v.url.as_ref()))
}

/// Items with unknown media types or without URLs are skipped. Carousel children inherit the
/// parent caption when they have none.
fn parse_items(items: &[ApiItem], inherited_caption: Option<&String>) -> Vec<MediaItem> {
    let mut results = Vec::new();
    for item in items {
        let caption = edge_caption(item.edge_media_to_caption.as_ref())
            .or_else(|| item.caption.as_ref().and_then(|c| non_empty(c.text.as_ref())))
            .or_else(|| inherited_caption.cloned());

        match item.media_type {
            Some(MEDIA_TYPE_PHOTO) => {
                let candidates = item.image_versions2.as_ref().and_then(|v| v.candidates.as_ref());
                if let Some(url) = first_url(candidates) {
                    results.push(MediaItem::photo(url, caption));
                }
            }
            Some(MEDIA_TYPE_VIDEO) => {
                if let Some(url) = first_url(item.video_versions.as_ref()) {
                    results.push(MediaItem::video(url, caption));
                }
            }
            Some(MEDIA_TYPE_CAROUSEL) => {
                if let Some(children) = &item.carousel_media {
                    results.extend(parse_items(children, caption.as_ref()));
                }
            }
            _ => {}
        }
    }
    results
}
