use crate::constants::{EDGE_BLUR_CLASS, EDGE_BLUR_LAYER_BG};
use crate::dom;
use reel_core::EdgeBlurConfig;
use web_sys as web;

/// Stacked backdrop-filter layers pinned to one edge of `target`.
pub struct EdgeBlurMount {
    container: Option<web::HtmlElement>,
}

impl EdgeBlurMount {
    pub fn mount(target: &web::HtmlElement, config: &EdgeBlurConfig) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let edge = config.position;
        let container = dom::create_html_element(&document, "div")?;
        container.set_class_name(&format!("{EDGE_BLUR_CLASS} {EDGE_BLUR_CLASS}-{edge}"));
        let z_index = config.z_index.to_string();
        dom::set_styles(
            &container,
            &[
                ("position", if config.fixed { "fixed" } else { "absolute" }),
                ("z-index", z_index.as_str()),
                ("overflow", "hidden"),
                ("pointer-events", "none"),
                ("transform", "translate3d(0, 0, 0)"),
                (edge.as_str(), "0"),
            ],
        );
        if edge.is_horizontal() {
            dom::set_styles(
                &container,
                &[("top", "0"), ("bottom", "0"), ("width", config.size.as_str())],
            );
        } else {
            dom::set_styles(
                &container,
                &[("left", "0"), ("right", "0"), ("height", config.size.as_str())],
            );
        }

        let inner = dom::create_html_element(&document, "div")?;
        let opacity = config.opacity.to_string();
        dom::set_styles(
            &inner,
            &[
                ("position", "relative"),
                ("width", "100%"),
                ("height", "100%"),
                ("opacity", opacity.as_str()),
            ],
        );

        for layer in config.layers() {
            let div = dom::create_html_element(&document, "div")?;
            let filter = layer.backdrop_filter();
            dom::set_styles(
                &div,
                &[
                    ("position", "absolute"),
                    ("inset", "0"),
                    ("mask-image", layer.mask.as_str()),
                    ("-webkit-mask-image", layer.mask.as_str()),
                    ("mask-repeat", "no-repeat"),
                    ("-webkit-mask-repeat", "no-repeat"),
                    ("mask-size", "100% 100%"),
                    ("-webkit-mask-size", "100% 100%"),
                    ("background", EDGE_BLUR_LAYER_BG),
                    ("backdrop-filter", filter.as_str()),
                    ("-webkit-backdrop-filter", filter.as_str()),
                ],
            );
            inner
                .append_child(&div)
                .map_err(|e| anyhow::anyhow!("append layer failed: {:?}", e))?;
        }
        container
            .append_child(&inner)
            .map_err(|e| anyhow::anyhow!("append inner failed: {:?}", e))?;

        if config.fixed {
            let body = document
                .body()
                .ok_or_else(|| anyhow::anyhow!("no body"))?;
            body.append_child(&container)
                .map_err(|e| anyhow::anyhow!("append to body failed: {:?}", e))?;
        } else {
            target
                .append_child(&container)
                .map_err(|e| anyhow::anyhow!("append to target failed: {:?}", e))?;
            // absolute children need a positioned parent
            let position = window
                .get_computed_style(target)
                .ok()
                .flatten()
                .and_then(|s| s.get_property_value("position").ok());
            if position.as_deref() == Some("static") {
                dom::set_styles(target, &[("position", "relative")]);
            }
        }
        log::info!(
            "[blur] mounted edge={} layers={} fixed={}",
            edge,
            config.div_count,
            config.fixed
        );

        Ok(Self {
            container: Some(container),
        })
    }

    pub fn destroy(&mut self) {
        if let Some(c) = self.container.take() {
            c.remove();
        }
    }
}

impl Drop for EdgeBlurMount {
    fn drop(&mut self) {
        self.destroy();
    }
}
