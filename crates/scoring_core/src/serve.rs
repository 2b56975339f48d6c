use shared::domain::{CourtEnd, Scores, ServeCourt, ServePosition, Side, ViewColumn};

/// Where the serving side serves from: its right court on an even score, left on odd.
///
/// Side `B` occupies the near end and faces away from the viewer, so its right court is
/// the viewer's right. Side `A` is at the far end facing the viewer, which mirrors it.
pub fn derive_serve_court(server: Side, scores: &Scores) -> ServePosition {
    let court = if scores[server] % 2 == 0 {
        ServeCourt::Right
    } else {
        ServeCourt::Left
    };

    let (end, column) = match (server, court) {
        (Side::B, ServeCourt::Right) => (CourtEnd::Near, ViewColumn::Right),
        (Side::B, ServeCourt::Left) => (CourtEnd::Near, ViewColumn::Left),
        (Side::A, ServeCourt::Right) => (CourtEnd::Far, ViewColumn::Left),
        (Side::A, ServeCourt::Left) => (CourtEnd::Far, ViewColumn::Right),
    };

    ServePosition {
        server,
        court,
        end,
        column,
    }
}

#[cfg(test)]
#[path = "tests/serve_tests.rs"]
mod tests;
