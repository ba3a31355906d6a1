//! Slide leaf renderer: image plus caption, with passthrough attributes on the figure.

use std::fmt;
use std::sync::Arc;

use crate::attrs::Attrs;
use crate::component::Component;
use crate::node::{ClickHandler, Element, Node};
use crate::slide::Slide;

/// Image height used when neither the slide nor the carousel sets one.
pub const DEFAULT_IMG_HEIGHT: u16 = 12;

/// Props handed to an [`ImageRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageProps {
    pub src: String,
    pub height: u16,
}

/// Replaceable image element renderer.
#[derive(Clone)]
pub struct ImageRenderer(Arc<dyn Fn(&ImageProps) -> Node + Send + Sync>);

impl ImageRenderer {
    pub fn new(render: impl Fn(&ImageProps) -> Node + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }

    #[must_use]
    pub fn render(&self, props: &ImageProps) -> Node {
        (self.0)(props)
    }
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self::new(default_image)
    }
}

impl fmt::Debug for ImageRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ImageRenderer(..)")
    }
}

/// Stock image element: `<img src height>`.
#[must_use]
pub fn default_image(props: &ImageProps) -> Node {
    Element::new("img")
        .attr("src", props.src.as_str())
        .attr("height", props.height)
        .into()
}

/// Props for [`CarouselSlide`].
#[derive(Debug, Clone)]
pub struct SlideProps {
    pub img_url: String,
    pub description: String,
    pub attribution: Option<String>,
    pub img: ImageRenderer,
    pub img_height: u16,
    /// Forwarded to the `figure` element.
    pub attrs: Attrs,
    pub on_click: Option<ClickHandler>,
}

impl SlideProps {
    #[must_use]
    pub fn new(img_url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            img_url: img_url.into(),
            description: description.into(),
            attribution: None,
            img: ImageRenderer::default(),
            img_height: DEFAULT_IMG_HEIGHT,
            attrs: Attrs::new(),
            on_click: None,
        }
    }

    /// Props for `slide` laid over the carousel-wide `defaults`.
    #[must_use]
    pub fn from_slide(slide: Slide, defaults: &SlideDefaults) -> Self {
        Self {
            img_url: slide.img_url,
            description: slide.description,
            attribution: slide.attribution,
            img: defaults.img.clone(),
            img_height: slide.img_height.unwrap_or(defaults.img_height),
            attrs: slide.attrs.merged_over(&defaults.attrs),
            on_click: slide.on_click,
        }
    }
}

/// Carousel-wide display defaults merged under every slide.
#[derive(Debug, Clone)]
pub struct SlideDefaults {
    pub img: ImageRenderer,
    pub img_height: u16,
    pub attrs: Attrs,
}

impl Default for SlideDefaults {
    fn default() -> Self {
        Self {
            img: ImageRenderer::default(),
            img_height: DEFAULT_IMG_HEIGHT,
            attrs: Attrs::new(),
        }
    }
}

/// `<figure>` with the image and a `<figcaption>` of bold description then attribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarouselSlide;

impl Component for CarouselSlide {
    type Props = SlideProps;

    fn render(&self, props: SlideProps) -> Node {
        let image = props.img.render(&ImageProps {
            src: props.img_url,
            height: props.img_height,
        });
        let mut caption = Element::new("figcaption")
            .child(Element::new("strong").text(props.description))
            .text(" ");
        if let Some(attribution) = props.attribution {
            caption = caption.text(attribution);
        }
        Element::new("figure")
            .attrs(props.attrs)
            .on_click(props.on_click)
            .child(image)
            .child(caption)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttrValue;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn render(props: SlideProps) -> Node {
        CarouselSlide.render(props)
    }

    fn base_props() -> SlideProps {
        SlideProps::new("https://example.com/default.jpg", "Default test image")
    }

    #[test]
    fn renders_a_figure() {
        assert_eq!(render(base_props()).tag(), Some("figure"));
    }

    #[test]
    fn renders_image_and_figcaption_as_children() {
        let node = render(base_props());
        let figure = node.as_element().expect("figure element");
        let tags: Vec<_> = figure.child_elements().map(|e| e.tag).collect();
        assert_eq!(tags, vec!["img", "figcaption"]);
    }

    #[test]
    fn passes_img_url_through_to_the_image() {
        let mut props = base_props();
        props.img_url = "https://example.com/image.png".into();
        let node = render(props);
        let img = node.find_tag("img").expect("img element");
        assert_eq!(
            img.attrs.get_text("src").as_deref(),
            Some("https://example.com/image.png")
        );
    }

    #[test]
    fn uses_description_and_attribution_as_the_caption() {
        let mut props = base_props();
        props.description = "A jaw-droppingly spectacular image".into();
        props.attribution = Some("Trevor Burnham".into());
        let node = render(props);
        let caption = node.find_tag("figcaption").expect("figcaption");
        assert_eq!(
            caption.text_content(),
            "A jaw-droppingly spectacular image Trevor Burnham"
        );
        let strong = node.find_tag("strong").expect("strong");
        assert_eq!(strong.text_content(), "A jaw-droppingly spectacular image");
    }

    #[test]
    fn passes_other_props_through_to_the_figure() {
        let clicked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&clicked);
        let mut props = base_props();
        props.attrs = Attrs::new()
            .with("style", "border: none")
            .with("class", "my-carousel-slide");
        props.on_click = Some(ClickHandler::new(move || flag.store(true, Ordering::SeqCst)));

        let node = render(props);
        let figure = node.as_element().expect("figure");
        assert_eq!(figure.attrs.keys(), vec!["style", "class"]);
        assert_eq!(
            figure.attrs.get("class"),
            Some(&AttrValue::from("my-carousel-slide"))
        );
        assert!(figure.click());
        assert!(clicked.load(Ordering::SeqCst));
    }

    #[test]
    fn renders_expected_markup() {
        let mut props = base_props();
        props.description = "Description".into();
        props.attribution = Some("Attribution".into());
        assert_eq!(
            render(props).to_markup(),
            "<figure><img src=\"https://example.com/default.jpg\" height=\"12\" />\
             <figcaption><strong>Description</strong> Attribution</figcaption></figure>"
        );
    }

    #[test]
    fn default_image_uses_src_and_height() {
        let node = default_image(&ImageProps {
            src: "https://example.com/default.jpg".into(),
            height: 30,
        });
        let img = node.as_element().expect("img");
        assert_eq!(img.tag, "img");
        assert_eq!(img.attrs.get("height"), Some(&AttrValue::Integer(30)));
    }

    #[test]
    fn image_renderer_can_be_replaced() {
        let mut props = base_props();
        props.img = ImageRenderer::new(|image| {
            Element::new("picture")
                .attr("data-src", image.src.as_str())
                .into()
        });
        let node = render(props);
        assert!(node.find_tag("img").is_none());
        assert!(node
            .find_by_attr("data-src", "https://example.com/default.jpg")
            .is_some());
    }

    #[test]
    fn slide_values_win_over_defaults() {
        let defaults = SlideDefaults {
            img_height: 20,
            attrs: Attrs::new().with("class", "default").with("title", "t"),
            ..SlideDefaults::default()
        };
        let slide = Slide::new("a.png", "A")
            .with_img_height(5)
            .with_attrs(Attrs::new().with("class", "own"));
        let props = SlideProps::from_slide(slide, &defaults);
        assert_eq!(props.img_height, 5);
        assert_eq!(props.attrs.get_text("class").as_deref(), Some("own"));
        assert_eq!(props.attrs.get_text("title").as_deref(), Some("t"));

        let plain = SlideProps::from_slide(Slide::new("b.png", "B"), &defaults);
        assert_eq!(plain.img_height, 20);
    }
}
