//! Videos page: one section per video, a thumbnail linking to the watch page.

use crate::error::Result;
use crate::generators::{fill, render_list, Page};
use crate::linker::{link_rows, RowContext, RowFormatter};
use crate::markdown::{image, link, Template};
use crate::options::{LinkBases, Options};
use crate::records::Video;
use crate::table::Row;

/// Template placeholder receiving the list
pub const PLACEHOLDER: &str = "video_list";

/// Length of a YouTube video id
const YOUTUBE_ID_LEN: usize = 11;

struct VideoFormatter<'a> {
    links: &'a LinkBases,
}

impl RowFormatter<Video> for VideoFormatter<'_> {
    fn row_id(&self, video: &Video) -> String {
        video.title.clone().unwrap_or_default()
    }

    fn format(&self, video: &Video, cx: &mut RowContext) -> String {
        let title = cx.required(video.title.as_deref(), "Title");
        let description = cx.required(video.description.as_deref(), "Description");
        let id = cx.required(video.youtube_id.as_deref(), "YouTube ID");
        if !id.is_empty()
            && (id.len() != YOUTUBE_ID_LEN
                || !id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        {
            cx.invalid("YouTube ID", format!("is not a YouTube video id: '{}'", id));
        }

        let thumbnail = image(title, &self.links.youtube_thumbnail(id));
        format!(
            "## {}\n\n{}\n\n{}",
            title,
            link(&thumbnail, &self.links.youtube_watch(id)),
            description
        )
    }
}

/// Render the video sections into `template`.
pub fn render(template: &Template, videos: &[Row<Video>], options: &Options) -> Result<Page> {
    let formatter = VideoFormatter {
        links: &options.links,
    };
    let output = link_rows(videos, &formatter, &options.linking);
    let (rendered, report) = render_list(output, "\n\n");
    log::info!("Rendered {} video(s)", videos.len());

    Ok(Page {
        contents: fill(template, PLACEHOLDER, &rendered)?,
        report,
    })
}
