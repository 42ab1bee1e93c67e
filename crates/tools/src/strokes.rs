use anyhow::{bail, Context};
use vision_core::canvas::Canvas;

/// One press-drag-release gesture in canvas pixel coordinates.
pub type Stroke = Vec<(i32, i32)>;

/// Parse `"x,y x,y ..."` into a stroke.
pub fn parse_stroke(raw: &str) -> anyhow::Result<Stroke> {
    let mut points = Vec::new();
    for token in raw.split_whitespace() {
        let (x, y) = token
            .split_once(',')
            .with_context(|| format!("point {token:?} is not of the form x,y"))?;
        let x = x
            .trim()
            .parse::<i32>()
            .with_context(|| format!("bad x coordinate in {token:?}"))?;
        let y = y
            .trim()
            .parse::<i32>()
            .with_context(|| format!("bad y coordinate in {token:?}"))?;
        points.push((x, y));
    }
    if points.is_empty() {
        bail!("stroke {raw:?} has no points");
    }
    Ok(points)
}

/// Press at the first point, drag through the rest, release. Returns whether the
/// release should trigger a recognition.
pub fn replay_stroke(canvas: &mut Canvas, stroke: &[(i32, i32)]) -> bool {
    let Some((&first, rest)) = stroke.split_first() else {
        return false;
    };
    canvas.begin_stroke(first);
    for &point in rest {
        canvas.stroke_to(point);
    }
    canvas.end_stroke()
}
