//! The static page and the assets it links.
//!
//! The interaction script and stylesheet live in `assets/` and are embedded
//! at compile time, so a render only has to write the returned files.

use crate::{config::HeatmapConfig, scene::Scene, svg::escape_xml};

static HEATMAP_JS: &str = include_str!("../assets/js/heatmap.js");
static HEATMAP_CSS: &str = include_str!("../assets/css/heatmap.css");

/// Name of the page document served at `/`.
pub const INDEX_HTML: &str = "index.html";

/// One file of the rendered site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFile {
    pub name: &'static str,
    pub contents: String,
}

/// The HTML document wrapping the chart.
pub fn render_page(scene: &Scene, config: &HeatmapConfig) -> String {
    let title = escape_xml(&config.title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="heatmap.css">
</head>
<body>
<h1>{title}</h1>
<p class="hint">Click the chart to switch between maximum and minimum temperature.</p>
{svg}
<div id="tooltip" class="hidden"></div>
<script src="heatmap.js"></script>
</body>
</html>
"#,
        title = title,
        svg = scene.to_svg()
    )
}

/// Every file needed to view the chart: the page plus its script and stylesheet.
pub fn site_files(scene: &Scene, config: &HeatmapConfig) -> Vec<SiteFile> {
    vec![
        SiteFile {
            name: INDEX_HTML,
            contents: render_page(scene, config),
        },
        SiteFile {
            name: "heatmap.js",
            contents: HEATMAP_JS.to_string(),
        },
        SiteFile {
            name: "heatmap.css",
            contents: HEATMAP_CSS.to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scene::render_scene, state::ViewState};
    use tmx_data::Pipeline;

    fn scene(config: &HeatmapConfig) -> Scene {
        let data = Pipeline::default()
            .run_csv_str("date,max_temperature,min_temperature\n2021-05-01,28,21\n")
            .unwrap();
        render_scene(&data, &ViewState::default(), config)
    }

    #[test]
    fn test_page_links_assets_and_embeds_svg() {
        let config = HeatmapConfig::default();
        let page = render_page(&scene(&config), &config);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<link rel="stylesheet" href="heatmap.css">"#));
        assert!(page.contains(r#"<script src="heatmap.js"></script>"#));
        assert!(page.contains(r#"<div id="tooltip" class="hidden"></div>"#));
        assert!(page.contains(r#"<svg id="matrix-chart""#));
        assert!(page.contains("<title>Daily Temperature Matrix</title>"));
    }

    #[test]
    fn test_title_is_escaped() {
        let config = HeatmapConfig {
            title: "Highs & Lows".to_string(),
            ..HeatmapConfig::default()
        };
        let page = render_page(&scene(&config), &config);
        assert!(page.contains("<h1>Highs &amp; Lows</h1>"));
    }

    #[test]
    fn test_site_files() {
        let config = HeatmapConfig::default();
        let files = site_files(&scene(&config), &config);
        let names: Vec<&str> = files.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["index.html", "heatmap.js", "heatmap.css"]);
        assert!(files[1].contents.contains("data-fill-"));
        assert!(files[2].contents.contains("#tooltip.hidden"));
    }
}
