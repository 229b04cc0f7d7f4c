use blockfall::core::{GameSnapshot, GameState};
use blockfall::term::{piece_color, AnchorY, GameView, Viewport};
use blockfall::types::{GameAction, PieceKind};

fn row_text(fb: &blockfall::term::FrameBuffer, y: u16) -> String {
    fb.row_text(y)
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::with_seed(1).snapshot();

    // 10x20 cells at 2x1 plus the border fills a 22x22 viewport exactly.
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.board[19][0] = PieceKind::I.color();

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0, y0).unwrap().style.fg, piece_color(PieceKind::I));
}

#[test]
fn term_view_side_panel_shows_stats() {
    let mut gs = GameState::with_seed(1);
    gs.start();
    let mut snap = gs.snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(50, 24));

    // Panel column: board frame (22 wide, at x=14) plus a 2 column gap.
    let text: Vec<String> = (0..24).map(|y| row_text(&fb, y)).collect();
    assert!(text[0].contains("SCORE"));
    assert!(text[1].contains("1234"));
    assert!(text[3].contains("LEVEL"));
    assert!(text[4].contains('2'));
    assert!(text[6].contains("LINES"));
    assert!(text[7].contains("10"));
    assert!(text.iter().any(|row| row.contains("NEXT")));
}

#[test]
fn term_view_game_over_overlay_after_top_out() {
    let mut gs = GameState::with_seed(3);
    gs.start();
    while !gs.game_over() {
        gs.apply_action(GameAction::HardDrop);
    }

    let fb = GameView::default().render(&gs.snapshot(), Viewport::new(40, 24));
    assert!((0..24).any(|y| row_text(&fb, y).contains("GAME OVER")));
}
