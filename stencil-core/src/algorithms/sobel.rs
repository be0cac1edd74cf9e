//! Sobel gradient operator (§4.4): standard 3x3 kernels over interior
//! pixels only (border pixels keep gx=gy=mag=0), magnitude max-normalized.

use crate::raster::{FloatField, Sobel};

pub fn sobel(norm: &FloatField) -> Sobel {
    let width = norm.width;
    let height = norm.height;
    let size = (width as usize) * (height as usize);
    let mut gx = vec![0f32; size];
    let mut gy = vec![0f32; size];
    let mut mag = vec![0f32; size];

    if width < 3 || height < 3 {
        return Sobel { width, height, gx, gy, mag };
    }

    let mut max_mag = 0f32;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let tl = norm.get(x - 1, y - 1);
            let tm = norm.get(x, y - 1);
            let tr = norm.get(x + 1, y - 1);
            let ml = norm.get(x - 1, y);
            let mr = norm.get(x + 1, y);
            let bl = norm.get(x - 1, y + 1);
            let bm = norm.get(x, y + 1);
            let br = norm.get(x + 1, y + 1);

            let sx = (tr + 2.0 * mr + br) - (tl + 2.0 * ml + bl);
            let sy = (bl + 2.0 * bm + br) - (tl + 2.0 * tm + tr);
            let m = (sx * sx + sy * sy).sqrt();

            let idx = (y as usize) * (width as usize) + (x as usize);
            gx[idx] = sx;
            gy[idx] = sy;
            mag[idx] = m;
            if m > max_mag {
                max_mag = m;
            }
        }
    }

    let divisor = max_mag.max(1e-6);
    for m in mag.iter_mut() {
        *m /= divisor;
    }

    Sobel { width, height, gx, gy, mag }
}
