use common_stdx::Point;

use crate::world::Collider;

/// Whether two colliders placed at absolute positions share an occupied cell.
///
/// Two simple colliders only need the rectangle test. Otherwise the shared
/// rectangle is scanned and each cell is checked against both masks.
pub(crate) fn colliders_overlap(
    a: &Collider,
    a_pos: Point<i32>,
    b: &Collider,
    b_pos: Point<i32>,
) -> bool {
    let (a_size, b_size) = (a.size(), b.size());
    let ax = (a_pos.x as i64, a_pos.x as i64 + a_size.x as i64);
    let ay = (a_pos.y as i64, a_pos.y as i64 + a_size.y as i64);
    let bx = (b_pos.x as i64, b_pos.x as i64 + b_size.x as i64);
    let by = (b_pos.y as i64, b_pos.y as i64 + b_size.y as i64);

    if !(ax.0 < bx.1 && ax.1 > bx.0 && ay.0 < by.1 && ay.1 > by.0) {
        return false;
    }
    if a.is_simple() && b.is_simple() {
        return true;
    }

    let (x0, x1) = (ax.0.max(bx.0), ax.1.min(bx.1));
    let (y0, y1) = (ay.0.max(by.0), ay.1.min(by.1));
    for y in y0..y1 {
        for x in x0..x1 {
            let in_a = a.occupied((x - ax.0) as u32, (y - ay.0) as u32);
            if in_a && b.occupied((x - bx.0) as u32, (y - by.0) as u32) {
                return true;
            }
        }
    }
    false
}
