//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::core::TourVariant;
use crate::shared::{RenderScene, SceneCity};

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState) -> RenderScene {
    let tour = &state.tour;

    // Colored: letzte Stadt der Tour, Classic: explizite Teilauswahl
    let current = tour
        .highlighted()
        .or_else(|| if tour.is_complete() { None } else { tour.tour().last().copied() });

    let cities = tour
        .cities()
        .iter()
        .map(|city| SceneCity {
            position: city.position,
            rgb: city.color.as_ref().and_then(|c| c.to_rgb()),
            current: current == Some(city.index),
        })
        .collect();

    let tour_points = tour
        .tour()
        .iter()
        .filter_map(|&i| tour.cities().get(i).map(|c| c.position))
        .collect();

    RenderScene {
        logical_size: tour.logical_size(),
        cities,
        tour_points,
        // Nur Classic zeichnet die Rückkante zur Startstadt
        close_loop: tour.is_complete() && tour.rules().variant == TourVariant::Classic,
        options: state.options.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::AppState;
    use crate::core::{Problem, TourVariant};
    use crate::shared::AppOptions;
    use glam::Vec2;

    fn state_with_square() -> AppState {
        square_state(AppState::new())
    }

    fn square_state(mut state: AppState) -> AppState {
        state
            .tour
            .load(Problem::from_points(&[
                [0.0, 0.0],
                [10.0, 0.0],
                [0.0, 10.0],
                [10.0, 10.0],
            ]))
            .expect("gültig");
        state
    }

    #[test]
    fn open_tour_has_no_closing_edge_and_marks_last_city() {
        let mut state = state_with_square();
        state.tour.pick(Vec2::new(0.0, 0.0));
        state.tour.pick(Vec2::new(10.0, 0.0));
        state.tour.pick(Vec2::new(0.0, 10.0));

        let scene = build(&state);
        assert_eq!(scene.cities.len(), 4);
        assert_eq!(scene.edges().len(), 2);
        assert!(scene.cities[2].current);
        assert!(!scene.cities[0].current);
    }

    #[test]
    fn complete_classic_tour_draws_closing_edge() {
        let options = AppOptions {
            variant: TourVariant::Classic,
            ..AppOptions::default()
        };
        let mut state = square_state(AppState::with_options(options));
        for p in [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]] {
            state.tour.pick(Vec2::from_array(p));
        }

        let scene = build(&state);
        let edges = scene.edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], (Vec2::new(0.0, 10.0), Vec2::new(0.0, 0.0)));
        assert!(scene.cities.iter().all(|c| !c.current));
    }

    #[test]
    fn complete_colored_tour_stays_open() {
        let mut state = state_with_square();
        for p in [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]] {
            state.tour.pick(Vec2::from_array(p));
        }

        assert!(state.tour.is_complete());
        let scene = build(&state);
        assert!(!scene.close_loop);
        assert_eq!(scene.edges().len(), 3);
    }
}
