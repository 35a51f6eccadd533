use crate::shape::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Clock Wise
    ///
    ///  a     b
    ///             c
    ///
    CW,
    /// Counter Clock Wise
    ///             c
    ///  a     b
    CCW,
    /// Collinear
    ///  a     b    c
    Collinear,
}

impl Orientation {
    pub fn is_cw(&self) -> bool {
        matches!(self, Self::CW)
    }

    pub fn is_ccw(&self) -> bool {
        matches!(self, Self::CCW)
    }
}

/// Twice the signed area of triangle abc, positive when counter clockwise.
#[inline]
pub fn orient_2d_value(a: Point, b: Point, c: Point) -> f64 {
    let detleft = (a.x - c.x) * (b.y - c.y);
    let detright = (a.y - c.y) * (b.x - c.x);
    detleft - detright
}

pub fn orient_2d(a: Point, b: Point, c: Point) -> Orientation {
    let val = orient_2d_value(a, b, c);

    if val == 0. {
        Orientation::Collinear
    } else if val > 0. {
        Orientation::CCW
    } else {
        Orientation::CW
    }
}

/// check whether pd is in circle defined by pa, pb, pc
/// requirements: pa, pb, pc counter clockwise, and pa is known to be
/// opposite side with pd. Also false when quad pa-pb-pd-pc is not convex,
/// so the result doubles as "edge pb-pc can be flipped to pa-pd".
pub fn in_circle(pa: Point, pb: Point, pc: Point, pd: Point) -> bool {
    let adx = pa.x - pd.x;
    let ady = pa.y - pd.y;
    let bdx = pb.x - pd.x;
    let bdy = pb.y - pd.y;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let oabd = adxbdy - bdxady;

    if oabd <= 0. {
        return false;
    }

    let cdx = pc.x - pd.x;
    let cdy = pc.y - pd.y;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let ocad = cdxady - adxcdy;

    if ocad <= 0. {
        return false;
    }

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * ocad + clift * oabd;

    det > 0.
}

/// p lies inside or on the border of counter clockwise triangle abc
pub fn in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    !orient_2d(a, b, p).is_cw() && !orient_2d(b, c, p).is_cw() && !orient_2d(c, a, p).is_cw()
}
