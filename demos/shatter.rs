use clap::Parser;
use delaunay_sweep::{
    loader::{Loader, PlainFileLoader},
    Context, Edge, Observer, Point, PointId, SortAxis, SweeperBuilder, Triangulation,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Shatter an image into Delaunay fragments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Load points from a file instead of generating them
    #[arg(short, long)]
    path: Option<std::path::PathBuf>,

    #[arg(long, default_value = "800")]
    width: f64,

    #[arg(long, default_value = "600")]
    height: f64,

    /// Number of random interior points
    #[arg(long, default_value = "400")]
    count: usize,

    /// Focal point, image center when not set
    #[arg(long)]
    focus_x: Option<f64>,

    #[arg(long)]
    focus_y: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Sweep along y instead of x
    #[arg(long, default_value = "false")]
    sweep_y: bool,

    /// Write the fragments as svg
    #[arg(long)]
    svg: Option<std::path::PathBuf>,

    /// Directory to dump one svg per inserted point
    #[arg(long)]
    frames: Option<std::path::PathBuf>,
}

fn generate(args: &Args) -> Vec<Point> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut points = Vec::<Point>::with_capacity(args.count + 5);
    for _ in 0..args.count {
        let x: f64 = rng.gen_range(0.0..args.width);
        let y: f64 = rng.gen_range(0.0..args.height);
        points.push(Point::new(x, y));
    }

    points.push(Point::new(
        args.focus_x.unwrap_or(args.width / 2.),
        args.focus_y.unwrap_or(args.height / 2.),
    ));
    points.extend([
        Point::new(0., 0.),
        Point::new(args.width, 0.),
        Point::new(0., args.height),
        Point::new(args.width, args.height),
    ]);
    points
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let points = match args.path.as_ref() {
        Some(path) => {
            let path = path.to_str().ok_or("path is not utf8")?;
            PlainFileLoader::default().load(path)?
        }
        None => generate(&args),
    };

    let sort_axis = if args.sweep_y { SortAxis::Y } else { SortAxis::X };
    let sweeper = SweeperBuilder::new(points.as_slice())
        .sort_axis(sort_axis)
        .build()?;

    let mut observer = FrameObserver::new(args.frames.clone());
    let triangulation = sweeper.triangulate_with_observer(&mut observer);

    let fragments = fragments(&triangulation, &points);
    println!(
        "points: {} triangles: {} fragments: {} largest cavity: {}",
        points.len(),
        triangulation.len(),
        fragments.len(),
        observer.largest_cavity
    );
    for fragment in fragments.iter().take(5) {
        println!(
            "  fragment at ({:.1}, {:.1}) size {:.1} x {:.1}",
            fragment.x, fragment.y, fragment.w, fragment.h
        );
    }

    if let Some(path) = args.svg.as_ref() {
        let mut doc = document(&points);
        for t in triangulation.iter() {
            let [p0, p1, p2] = t.points.map(|id| points[id.as_usize()]);
            doc = doc.add(triangle(p0, p1, p2, "blue", "white"));
        }
        svg::save(path, &doc)?;
        println!("svg written to {}", path.display());
    }

    Ok(())
}

/// Axis aligned box of one fragment
#[derive(Debug, Clone, Copy)]
struct Fragment {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// One box per triangle, degenerate boxes skipped
fn fragments(triangulation: &Triangulation, points: &[Point]) -> Vec<Fragment> {
    triangulation
        .iter()
        .filter_map(|t| {
            let [p0, p1, p2] = t.points.map(|id| points[id.as_usize()]);
            let x = p0.x.min(p1.x).min(p2.x);
            let y = p0.y.min(p1.y).min(p2.y);
            let w = p0.x.max(p1.x).max(p2.x) - x;
            let h = p0.y.max(p1.y).max(p2.y) - y;
            if w == 0. || h == 0. {
                return None;
            }
            Some(Fragment { x, y, w, h })
        })
        .collect()
}

struct FrameObserver {
    dir: Option<std::path::PathBuf>,
    frame: usize,
    largest_cavity: usize,
}

impl FrameObserver {
    fn new(dir: Option<std::path::PathBuf>) -> Self {
        Self {
            dir,
            frame: 0,
            largest_cavity: 0,
        }
    }

    fn draw(&mut self, point_id: PointId, boundary: &[Edge], context: &Context) {
        let Some(dir) = self.dir.as_ref() else {
            return;
        };

        let real = context.points.as_slice();
        let at = |id: PointId| context.points.get_point(id);

        let mut doc = document(real);
        for circle_id in context.open.iter().chain(context.closed.iter()) {
            let circle = circle_id.get(&context.circles);
            if !circle.is_real(context.points) {
                continue;
            }
            let [a, b, c] = circle.points;
            if let (Some(p0), Some(p1), Some(p2)) = (at(a), at(b), at(c)) {
                let fill = if context.closed.contains(circle_id) {
                    "gray"
                } else {
                    "clear"
                };
                doc = doc.add(triangle(p0, p1, p2, "blue", fill));
            }
        }
        for edge in boundary {
            if let (Some(p), Some(q)) = (at(edge.p), at(edge.q)) {
                doc = doc.add(line(p, q, "red"));
            }
        }
        if let Some(p) = at(point_id) {
            doc = doc.add(circle(p, 4., "red", "red"));
        }

        let path = dir.join(format!("frame_{:05}.svg", self.frame));
        self.frame += 1;
        if let Err(e) = svg::save(&path, &doc) {
            log::warn!("cannot write {}: {e}", path.display());
        }
    }
}

impl Observer for FrameObserver {
    fn cavity(&mut self, point_id: PointId, boundary: &[Edge], context: &Context) {
        self.largest_cavity = self.largest_cavity.max(boundary.len());
        self.draw(point_id, boundary, context);
    }

    fn finalized(&mut self, triangulation: &Triangulation) {
        log::info!("{} triangles", triangulation.len());
    }
}

fn document(points: &[Point]) -> svg::Document {
    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let mut doc = svg::Document::new()
        .set(
            "viewBox",
            (min_x - 30., min_y - 30., max_x - min_x + 60., max_y - min_y + 60.),
        )
        .set("style", "background-color: #F5F5F5");
    for p in points {
        doc = doc.add(circle(*p, 2., "black", "black"));
    }
    doc
}

fn line(p: Point, q: Point, color: &str) -> svg::node::element::Line {
    svg::node::element::Line::new()
        .set("class", "edge")
        .set("stroke", to_color(color))
        .set("x1", p.x)
        .set("y1", p.y)
        .set("x2", q.x)
        .set("y2", q.y)
}

fn triangle(
    p0: Point,
    p1: Point,
    p2: Point,
    border_color: &str,
    fill_color: &str,
) -> svg::node::element::Path {
    let data = svg::node::element::path::Data::new()
        .move_to((p0.x, p0.y))
        .line_to((p1.x, p1.y))
        .line_to((p2.x, p2.y))
        .close();
    svg::node::element::Path::new()
        .set("d", data)
        .set("stroke", to_color(border_color))
        .set("fill", to_color(fill_color))
}

fn circle(c: Point, r: f64, stroke_color: &str, fill_color: &str) -> svg::node::element::Circle {
    svg::node::element::Circle::new()
        .set("cx", c.x)
        .set("cy", c.y)
        .set("r", r)
        .set("stroke", to_color(stroke_color))
        .set("fill", to_color(fill_color))
}

fn to_color(name: &str) -> String {
    match name {
        "blue" => "#29B6F6",
        "red" => "#EF5350",
        "black" => "#3E2723",
        "gray" => "#BDBDBD",
        "clear" => "#00000000",
        _ => name,
    }
    .into()
}
