//! Browser collaborators: 2D canvas surface and DOM score bar

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use super::{GameScreenLayout, Hud, Sprite, Surface};
use crate::settings::BackgroundKey;
use crate::sim::bounds::Aabb;
use crate::sim::obstacle::ObstacleKind;

fn background_color(key: BackgroundKey) -> &'static str {
    match key {
        BackgroundKey::One => "#1d2b3a",
        BackgroundKey::Two => "#2e1f33",
        BackgroundKey::Three => "#1f3325",
    }
}

fn sprite_color(sprite: Sprite) -> &'static str {
    match sprite {
        Sprite::Player => "#7f8c8d",
        Sprite::Life => "#e74c3c",
        Sprite::Obstacle(ObstacleKind::Bomb) => "#111111",
        Sprite::Obstacle(ObstacleKind::Bottle) => "#27ae60",
        Sprite::Obstacle(ObstacleKind::Can) => "#bdc3c7",
        Sprite::Obstacle(ObstacleKind::BananaPeel) => "#f1c40f",
    }
}

/// Draws flat rectangles onto a `<canvas>` 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the canvas has no 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        ctx.set_image_smoothing_enabled(false);
        Some(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn draw_background(&mut self, key: BackgroundKey) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.set_fill_style_str(background_color(key));
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn draw_sprite(&mut self, sprite: Sprite, bounds: Aabb) {
        let size = bounds.size();
        self.ctx.set_fill_style_str(sprite_color(sprite));
        self.ctx.fill_rect(
            bounds.min.x as f64,
            bounds.min.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }
}

/// Builds screens inside the `#app` mount point and updates the score bar
pub struct DomHud {
    document: Option<Document>,
    canvas: HtmlCanvasElement,
}

impl DomHud {
    const MOUNT_ID: &'static str = "app";
    const SCORE_ID: &'static str = "_score";
    const HIGHSCORE_ID: &'static str = "_highscore";

    pub fn new(canvas: &HtmlCanvasElement) -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
            canvas: canvas.clone(),
        }
    }

    /// Empty the mount point; `None` if the page has no `#app`
    fn clear_mount(&self) -> Option<(&Document, Element)> {
        let document = self.document.as_ref()?;
        let mount = document.get_element_by_id(Self::MOUNT_ID)?;
        mount.set_inner_html("");
        Some((document, mount))
    }

    fn text_element(document: &Document, tag: &str, class: &str, text: &str) -> Option<Element> {
        let el = document.create_element(tag).ok()?;
        el.set_class_name(class);
        el.set_text_content(Some(text));
        Some(el)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.as_ref().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }
}

impl Hud for DomHud {
    fn build_game_screen(&mut self) {
        let Some((document, mount)) = self.clear_mount() else {
            return;
        };
        if GameScreenLayout::for_width(mount.client_width()) == GameScreenLayout::MobileOnly {
            if let Ok(notice) = document.create_element("div") {
                notice.set_class_name("desktop-message");
                if let Some(h1) = Self::text_element(document, "h1", "", "Only for mobile") {
                    let _ = notice.append_child(&h1);
                }
                let _ = mount.append_child(&notice);
            }
            return;
        }
        let Ok(bar) = document.create_element("div") else {
            return;
        };
        bar.set_class_name("score");
        for id in [Self::SCORE_ID, Self::HIGHSCORE_ID] {
            if let Some(p) = Self::text_element(document, "p", "scoreText", "") {
                p.set_id(id);
                let _ = bar.append_child(&p);
            }
        }
        let _ = mount.append_child(&bar);
        let _ = mount.append_child(&self.canvas);
    }

    fn build_menu(&mut self, highscore: u64, player_name: Option<&str>) {
        let Some((document, mount)) = self.clear_mount() else {
            return;
        };
        let greeting = match player_name {
            Some(name) => format!("Welcome back, {}!", name),
            None => "Garbage Catch".to_string(),
        };
        let lines = [
            ("h1", "menu-title", greeting),
            ("p", "menu-text", format!("High Score: {}", highscore)),
            ("p", "menu-text", "Tap to start".to_string()),
        ];
        for (tag, class, text) in &lines {
            if let Some(el) = Self::text_element(document, tag, class, text) {
                let _ = mount.append_child(&el);
            }
        }
        let _ = mount.append_child(&self.canvas);
    }

    fn build_game_over(&mut self, score: u64, highscore: u64) {
        let Some((document, mount)) = self.clear_mount() else {
            return;
        };
        let lines = [
            ("h1", "menu-title", "Game Over".to_string()),
            ("p", "menu-text", format!("Score: {}", score)),
            ("p", "menu-text", format!("High Score: {}", highscore)),
            ("p", "menu-text", "Tap to play again".to_string()),
        ];
        for (tag, class, text) in &lines {
            if let Some(el) = Self::text_element(document, tag, class, text) {
                let _ = mount.append_child(&el);
            }
        }
        let _ = mount.append_child(&self.canvas);
    }

    fn set_score(&mut self, score: u64, highscore: u64) {
        self.set_text(Self::SCORE_ID, &format!("Score: {}", score));
        self.set_text(Self::HIGHSCORE_ID, &format!("High Score: {}", highscore));
    }
}
