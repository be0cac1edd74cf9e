//! Morphology (§4.10): square structuring element dilate/erode. Reads
//! outside the image are treated as background, radius 0 is identity.

use crate::raster::BinaryRaster;

pub fn dilate(b: &BinaryRaster, r: u32) -> BinaryRaster {
    if r == 0 {
        return b.clone();
    }
    morph(b, r, true)
}

pub fn erode(b: &BinaryRaster, r: u32) -> BinaryRaster {
    if r == 0 {
        return b.clone();
    }
    morph(b, r, false)
}

fn morph(b: &BinaryRaster, r: u32, is_dilate: bool) -> BinaryRaster {
    let width = b.width as i64;
    let height = b.height as i64;
    let mut out = BinaryRaster::new(b.width, b.height);
    let ri = r as i64;

    for y in 0..height {
        for x in 0..width {
            let mut any_one = false;
            let mut all_one = true;
            for dy in -ri..=ri {
                for dx in -ri..=ri {
                    let nx = x + dx;
                    let ny = y + dy;
                    let v = if nx >= 0 && nx < width && ny >= 0 && ny < height {
                        b.data[(ny as usize) * (b.width as usize) + (nx as usize)]
                    } else {
                        0
                    };
                    if v != 0 {
                        any_one = true;
                    } else {
                        all_one = false;
                    }
                }
            }
            let result = if is_dilate { any_one } else { all_one };
            out.data[(y as usize) * (b.width as usize) + (x as usize)] = if result { 1 } else { 0 };
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_zero_is_identity() {
        let mut b = BinaryRaster::new(4, 4);
        b.data[5] = 1;
        assert_eq!(dilate(&b, 0).data, b.data);
        assert_eq!(erode(&b, 0).data, b.data);
    }

    #[test]
    fn dilate_grows_a_single_pixel() {
        let mut b = BinaryRaster::new(5, 5);
        b.data[2 * 5 + 2] = 1;
        let out = dilate(&b, 1);
        assert_eq!(out.data.iter().filter(|&&v| v == 1).count(), 9);
    }

    #[test]
    fn erode_shrinks_a_solid_block() {
        let mut b = BinaryRaster::new(5, 5);
        for y in 1..4 {
            for x in 1..4 {
                b.data[y * 5 + x] = 1;
            }
        }
        let out = erode(&b, 1);
        assert_eq!(out.data[2 * 5 + 2], 1);
        assert_eq!(out.data[0], 0);
    }
}
