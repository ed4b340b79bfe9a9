use ai_coursework::pente::{self, AlphaBeta, Board, Coord, GameInput, PlayerConfig, Stone};

fn input_text(color: &str, caps: &str, white: &[(usize, usize)], black: &[(usize, usize)]) -> String {
    let mut rows = vec![vec!['.'; 19]; 19];
    for &(r, c) in white {
        rows[r][c] = 'w';
    }
    for &(r, c) in black {
        rows[r][c] = 'b';
    }
    let mut text = format!("{color}\n100.0\n{caps}\n");
    for row in rows {
        text.extend(row);
        text.push('\n');
    }
    text
}

fn decide(text: &str) -> String {
    let mut input: GameInput = text.parse().unwrap();
    let mv = pente::choose_move(&mut input, &PlayerConfig::default()).unwrap();
    pente::format_output(mv)
}

#[test]
fn white_opens_in_the_centre() {
    assert_eq!(decide(&input_text("WHITE", "0,0", &[], &[])), "10K");
}

#[test]
fn white_opens_in_the_centre_after_losing_stones() {
    assert_eq!(decide(&input_text("WHITE", "0,2", &[], &[])), "10K");
}

#[test]
fn black_completes_five() {
    let text = input_text("BLACK", "0,0", &[(9, 9), (0, 0), (0, 2), (18, 18)], &[(5, 3), (5, 4), (5, 5), (5, 6)]);
    assert_eq!(decide(&text), "14C");
}

#[test]
fn fifth_capture_wins() {
    let text = input_text("WHITE", "8,0", &[(3, 3), (9, 9), (12, 12)], &[(3, 4), (3, 5), (10, 10)]);
    assert_eq!(decide(&text), "16G");
}

#[test]
fn chosen_moves_are_always_legal() {
    let cfg = PlayerConfig { depth: 1, candidate_radius: Some(1), ..Default::default() };
    let mut agent = AlphaBeta::with_config(cfg);
    let mut board = Board::new();
    for _ in 0..20 {
        if board.winner().is_some() {
            break;
        }
        let mover = board.to_move();
        let mv = agent.best_move(&mut board).unwrap();
        assert!(board.legal_moves().contains(&mv), "{mover} chose {mv}");
        board.make_move(mv).unwrap();
    }
    assert_eq!(board.move_history().next(), Some(Coord::new(9, 9)));
    assert!(board.ply() > 2);
    assert!(board.stones_on_board(Stone::White) >= 1);
}

#[test]
fn notation_round_trips_on_the_corners() {
    for (text, coord) in [("19A", Coord::new(0, 0)), ("1T", Coord::new(18, 18)), ("10K", Coord::new(9, 9))] {
        assert_eq!(text.parse::<Coord>().unwrap(), coord);
        assert_eq!(coord.to_notation(), text);
    }
}
