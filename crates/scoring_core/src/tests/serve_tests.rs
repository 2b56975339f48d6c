use super::*;

#[test]
fn even_score_serves_from_right_court() {
    for score in [0, 2, 10, 20] {
        let scores = Scores::new(score, 7);
        assert_eq!(derive_serve_court(Side::A, &scores).court, ServeCourt::Right);
        let scores = Scores::new(7, score);
        assert_eq!(derive_serve_court(Side::B, &scores).court, ServeCourt::Right);
    }
}

#[test]
fn odd_score_serves_from_left_court() {
    for score in [1, 3, 11, 21] {
        let scores = Scores::new(score, 4);
        assert_eq!(derive_serve_court(Side::A, &scores).court, ServeCourt::Left);
        let scores = Scores::new(4, score);
        assert_eq!(derive_serve_court(Side::B, &scores).court, ServeCourt::Left);
    }
}

#[test]
fn only_the_servers_own_score_matters() {
    let base = derive_serve_court(Side::B, &Scores::new(0, 6));
    for opponent in 0..5 {
        assert_eq!(derive_serve_court(Side::B, &Scores::new(opponent, 6)), base);
    }
}

#[test]
fn repeated_calls_agree() {
    let scores = Scores::new(5, 8);
    for server in Side::BOTH {
        assert_eq!(
            derive_serve_court(server, &scores),
            derive_serve_court(server, &scores)
        );
    }
}

#[test]
fn far_side_is_mirrored_for_the_viewer() {
    let near_even = derive_serve_court(Side::B, &Scores::new(0, 0));
    assert_eq!(near_even.end, CourtEnd::Near);
    assert_eq!(near_even.column, ViewColumn::Right);

    let near_odd = derive_serve_court(Side::B, &Scores::new(0, 1));
    assert_eq!(near_odd.column, ViewColumn::Left);

    let far_even = derive_serve_court(Side::A, &Scores::new(0, 0));
    assert_eq!(far_even.end, CourtEnd::Far);
    assert_eq!(far_even.court, ServeCourt::Right);
    assert_eq!(far_even.column, ViewColumn::Left);

    let far_odd = derive_serve_court(Side::A, &Scores::new(1, 0));
    assert_eq!(far_odd.column, ViewColumn::Right);
}
