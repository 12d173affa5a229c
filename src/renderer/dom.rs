//! DOM renderer
//!
//! Each tap is a pre-built element `#tap-{id}` with a `.beer-liquid` child.
//! The stylesheet does the drawing; this backend only toggles classes
//! (`pouring`, `locked`, `perfect`) and sets the liquid height.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::TapRenderer;
use super::celebrate::Celebrations;
use crate::sim::{GameEvent, TapSnapshot};

struct TapElements {
    id: u32,
    root: Element,
    liquid: Option<HtmlElement>,
    /// Last height written, to skip redundant style writes
    last_fill: Option<f32>,
}

pub struct DomRenderer {
    taps: Vec<TapElements>,
    celebrations: Celebrations,
}

impl DomRenderer {
    /// Look up the elements of every tap; taps without markup are skipped
    pub fn new(document: &Document, taps: impl IntoIterator<Item = TapSnapshot>) -> Self {
        let mut elements = Vec::new();

        for tap in taps {
            let Some(root) = document.get_element_by_id(&format!("tap-{}", tap.id)) else {
                log::warn!("No element for tap {} - it will not be drawn", tap.id);
                continue;
            };

            let liquid = root
                .query_selector(".beer-liquid")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());

            match &liquid {
                Some(liquid) => {
                    let _ = liquid
                        .style()
                        .set_property("background-color", tap.beer_type.liquid_color());
                }
                None => log::warn!("Tap {} has no .beer-liquid element", tap.id),
            }

            elements.push(TapElements {
                id: tap.id,
                root,
                liquid,
                last_fill: None,
            });
        }

        log::info!("DOM renderer bound to {} taps", elements.len());
        Self {
            taps: elements,
            celebrations: Celebrations::new(),
        }
    }
}

impl TapRenderer for DomRenderer {
    fn begin_frame(&mut self, dt_ms: f32) {
        self.celebrations.advance(dt_ms);
    }

    fn render(&mut self, tap: &TapSnapshot) {
        let perfect = self.celebrations.is_active(tap.id);
        let Some(elements) = self.taps.iter_mut().find(|e| e.id == tap.id) else {
            return;
        };

        let classes = elements.root.class_list();
        let _ = classes.toggle_with_force("pouring", tap.pouring);
        let _ = classes.toggle_with_force("locked", tap.locked);
        let _ = classes.toggle_with_force("perfect", perfect);

        if elements.last_fill != Some(tap.fill_level) {
            if let Some(liquid) = &elements.liquid {
                let _ = liquid
                    .style()
                    .set_property("height", &format!("{:.1}%", tap.fill_level));
            }
            elements.last_fill = Some(tap.fill_level);
        }
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.celebrations.observe(event);
    }
}
