//! Terminal render path: controller -> TermCanvas -> BoardView

use tetromino_stacking::core::{Controller, ManualTimer};
use tetromino_stacking::term::{color_rgb, BoardView, TermCanvas, Viewport};
use tetromino_stacking::types::{Color, ColorMode, GameConfig, Intent};

fn game() -> Controller<TermCanvas, ManualTimer> {
    let config = GameConfig {
        seed: Some(11),
        ..GameConfig::default()
    };
    let mut game = Controller::new(config, TermCanvas::new(), ManualTimer::new());
    game.init_game();
    game
}

#[test]
fn test_canvas_tracks_active_piece() {
    let mut game = game();
    let before = game.active().unwrap();
    let color = before.kind.color();
    for (x, y) in before.cells() {
        assert_eq!(game.render().cell(x, y), Some(color));
    }

    assert!(game.apply(Intent::Drop));
    let after = game.active().unwrap();
    for (x, y) in after.cells() {
        assert_eq!(game.render().cell(x, y), Some(color));
    }
    for (x, y) in before.cells() {
        if !after.cells().contains(&(x, y)) {
            assert_eq!(game.render().cell(x, y), None);
        }
    }
}

#[test]
fn test_canvas_gets_queue_and_score() {
    let game = game();
    let (kinds, colors) = game.render().queue().unwrap();
    assert_eq!(kinds, game.queue().peek());
    assert_eq!(colors[0], kinds[0].color());
    assert_eq!(game.render().score(), 0);
}

#[test]
fn test_single_colour_mode_repaints_canvas() {
    let mut game = game();
    let options = GameConfig {
        color_mode: ColorMode::Single(Color::Violet),
        ..*game.config()
    };
    game.apply_options(options);

    let active = game.active().unwrap();
    for (x, y) in active.cells() {
        assert_eq!(game.render().cell(x, y), Some(Color::Violet));
    }
    let (_, colors) = game.render().queue().unwrap();
    assert!(colors.iter().all(|&c| c == Color::Violet));
}

#[test]
fn test_view_draws_piece_and_pause_overlay() {
    let mut game = game();
    game.apply(Intent::TogglePause);

    let view = BoardView::default();
    let fb = view.render(game.render(), Viewport::new(60, 30));

    let active = game.active().unwrap();
    let expected = color_rgb(active.kind.color());
    let painted = fb
        .cells()
        .iter()
        .filter(|cell| cell.ch == '█' && cell.style.fg == expected)
        .count();
    assert!(painted >= 8, "piece should cover 4 cells two columns wide");

    let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.contains("PAUSED"));
    assert!(text.contains("SCORE"));
}
