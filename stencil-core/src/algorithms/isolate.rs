//! White-pixel isolation (§4.11): thins clumps to their strongest isolated
//! points by walking white pixels in guide-value-descending order and
//! accepting a pixel unless an already-accepted pixel lies within its
//! diamond-shaped (L1) neighborhood.

use crate::raster::{BinaryRaster, FloatField};

pub fn isolate_white_pixels(b: &BinaryRaster, guide: &FloatField, radius: u32) -> BinaryRaster {
    if radius == 0 {
        return b.clone();
    }
    let width = b.width as i64;
    let height = b.height as i64;

    let mut candidates: Vec<usize> = b
        .data
        .iter()
        .enumerate()
        .filter_map(|(i, &v)| if v != 0 { Some(i) } else { None })
        .collect();

    // descending by guide value; stable ascending-index tiebreak
    candidates.sort_by(|&a, &b_idx| {
        guide.data[b_idx]
            .partial_cmp(&guide.data[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b_idx))
    });

    let mut accepted = vec![false; b.data.len()];
    let r = radius as i64;

    for &idx in &candidates {
        let x = (idx as i64) % width;
        let y = (idx as i64) / width;
        let mut blocked = false;
        'scan: for dy in -r..=r {
            let budget = r - dy.abs();
            for dx in -budget..=budget {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x + dx;
                let ny = y + dy;
                if nx >= 0 && nx < width && ny >= 0 && ny < height {
                    let nidx = (ny * width + nx) as usize;
                    if accepted[nidx] {
                        blocked = true;
                        break 'scan;
                    }
                }
            }
        }
        if !blocked {
            accepted[idx] = true;
        }
    }

    let mut out = BinaryRaster::new(b.width, b.height);
    for (i, &a) in accepted.iter().enumerate() {
        out.data[i] = if a { 1 } else { 0 };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_zero_is_identity() {
        let mut b = BinaryRaster::new(5, 5);
        b.data[12] = 1;
        let guide = FloatField::new(5, 5, 0.5);
        assert_eq!(isolate_white_pixels(&b, &guide, 0).data, b.data);
    }

    #[test]
    fn thins_a_dense_cluster() {
        let mut b = BinaryRaster::new(10, 10);
        for y in 3..7 {
            for x in 3..7 {
                b.data[y * 10 + x] = 1;
            }
        }
        let guide = FloatField::new(10, 10, 0.5);
        let out = isolate_white_pixels(&b, &guide, 2);
        let count = out.data.iter().filter(|&&v| v == 1).count();
        assert!(count < 16);
        assert!(count >= 1);
    }

    #[test]
    fn is_idempotent() {
        let mut b = BinaryRaster::new(12, 12);
        for y in 2..10 {
            for x in 2..10 {
                b.data[y * 12 + x] = 1;
            }
        }
        let guide = FloatField::new(12, 12, 0.5);
        let once = isolate_white_pixels(&b, &guide, 2);
        let twice = isolate_white_pixels(&once, &guide, 2);
        assert_eq!(once.data, twice.data);
    }
}
