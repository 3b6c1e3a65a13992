//! Scene assembly: turn the current `GameState` into a vertex list

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::Settings;
use crate::angle_to_dir;
use crate::consts::*;
use crate::sim::GameState;

/// Arrow shaft dimensions (visual only)
const ARROW_LENGTH: f32 = 30.0;
const ARROW_HEIGHT: f32 = 5.0;
/// Bow arc radius and the half-angle it extends past vertical
const BOW_RADIUS: f32 = 30.0;
const BOW_FLARE: f32 = 0.5;

/// Build the frame's vertex list from the live entities
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    if settings.show_aim_guide && state.is_active() {
        let tip = state.bow.pos + angle_to_dir(state.bow.angle) * FIELD_HEIGHT;
        vertices.extend(shapes::line(state.bow.pos, tip, 1.5, colors::AIM_GUIDE));
    }

    draw_bow(&mut vertices, state.bow.pos, state.bow.angle);

    for bubble in &state.bubbles {
        let fill = shapes::hsl_color(bubble.hue, 0.7, 0.5);
        vertices.extend(shapes::circle(bubble.pos, bubble.radius, fill, 24));
        vertices.extend(shapes::ring(
            bubble.pos,
            bubble.radius,
            bubble.radius + 2.0,
            colors::BUBBLE_OUTLINE,
            24,
        ));
    }

    for arrow in &state.arrows {
        vertices.extend(shapes::oriented_quad(
            arrow.pos,
            arrow.angle,
            ARROW_LENGTH,
            ARROW_HEIGHT,
            colors::ARROW_SHAFT,
        ));
        // Arrowhead: a triangle off the front of the shaft
        vertices.extend(shapes::oriented_triangle(
            arrow.pos,
            arrow.angle,
            [
                Vec2::new(ARROW_LENGTH / 2.0, -ARROW_HEIGHT),
                Vec2::new(ARROW_LENGTH / 2.0 + 10.0, 0.0),
                Vec2::new(ARROW_LENGTH / 2.0, ARROW_HEIGHT),
            ],
            colors::ARROW_HEAD,
        ));
    }

    vertices
}

/// Bow: an arc facing the aim direction plus a string across its tips
fn draw_bow(vertices: &mut Vec<Vertex>, pos: Vec2, angle: f32) {
    vertices.extend(shapes::arc_stroke(
        pos,
        BOW_RADIUS,
        angle - FRAC_PI_2 - BOW_FLARE,
        angle + FRAC_PI_2 + BOW_FLARE,
        5.0,
        colors::BOW,
        24,
    ));

    let string_dir = angle_to_dir(angle + FRAC_PI_2);
    vertices.extend(shapes::line(
        pos - string_dir * BOW_RADIUS,
        pos + string_dir * BOW_RADIUS,
        2.0,
        colors::BOWSTRING,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_scene_grows_with_entities() {
        let settings = Settings::default();
        let mut state = GameState::new(1);
        let menu_scene = build_scene(&state, &settings);

        state.start_level(1);
        let playing_scene = build_scene(&state, &settings);
        assert!(playing_scene.len() > menu_scene.len());

        state.fire();
        let with_arrow = build_scene(&state, &settings);
        assert!(with_arrow.len() > playing_scene.len());
    }
}
