//! HUD text in the page DOM

use web_sys::Document;

use crate::frontend::{HudStatus, HudSink};

/// Writes HUD status into DOM elements by id; missing elements are skipped
pub struct DomHud {
    document: Document,
    last: Option<HudStatus>,
}

impl DomHud {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            last: None,
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(&self, id: &str, class: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }
}

impl HudSink for DomHud {
    fn update(&mut self, status: &HudStatus) {
        // DOM writes are slow; skip identical frames
        if self.last.as_ref() == Some(status) {
            return;
        }

        self.set_text("lives", &status.lives.to_string());
        self.set_text("score", &status.score.to_string());
        self.set_text(
            "level",
            &format!("{}/{}", status.level, status.level_count),
        );
        self.set_class("shield", if status.shielded { "hud-item" } else { "hidden" });
        if status.double_score {
            self.set_class("double-score", "hud-item");
            self.set_text(
                "double-score-time",
                &format!("{:.0}s", status.double_score_remaining.ceil()),
            );
        } else {
            self.set_class("double-score", "hidden");
        }
        self.set_class("pause-screen", if status.paused { "" } else { "hidden" });

        match status.banner {
            Some(banner) => {
                self.set_text("game-over-text", banner);
                self.set_text("final-score", &status.score.to_string());
                self.set_class("game-over-screen", "");
            }
            None => self.set_class("game-over-screen", "hidden"),
        }

        self.last = Some(status.clone());
    }
}
