//! Node collections with interpolation state.
//!
//! [`Curve`] holds plane-curve nodes, [`ScalarCurve`] holds 1-D nodes. Both
//! keep their nodes sorted by time with pairwise distinct times, and both
//! forget their interpolated polynomials whenever a node changes.

use crate::error::{MathError, MathResult};
use crate::interpolation::{CurveNode, Node, interpolate, interpolate_curve};
use crate::intersection::{count_intersections, count_polygon_crossings};
use crate::line::{Line, Point};
use crate::polynomial::Polynomial;
use num_rational::BigRational;

/// A node that carries a parameter value.
pub trait TimedNode: Clone {
    /// Parameter value of the node.
    fn time(&self) -> &BigRational;
    /// Move the node to another parameter value.
    fn set_time(&mut self, time: BigRational);
}

impl TimedNode for Node {
    fn time(&self) -> &BigRational {
        &self.time
    }

    fn set_time(&mut self, time: BigRational) {
        self.time = time;
    }
}

impl TimedNode for CurveNode {
    fn time(&self) -> &BigRational {
        &self.time
    }

    fn set_time(&mut self, time: BigRational) {
        self.time = time;
    }
}

/// Nodes sorted by strictly increasing time.
#[derive(Debug, Clone)]
struct SortedNodes<N> {
    nodes: Vec<N>,
}

impl<N: TimedNode> SortedNodes<N> {
    fn new(mut nodes: Vec<N>) -> MathResult<Self> {
        nodes.sort_by(|a, b| a.time().cmp(b.time()));
        if let Some(pair) = nodes.windows(2).find(|w| w[0].time() == w[1].time()) {
            return Err(duplicate_time(pair[0].time()));
        }
        Ok(Self { nodes })
    }

    fn position(&self, time: &BigRational) -> Result<usize, usize> {
        self.nodes.binary_search_by(|n| n.time().cmp(time))
    }

    fn insert(&mut self, node: N) -> MathResult<usize> {
        match self.position(node.time()) {
            Ok(_) => Err(duplicate_time(node.time())),
            Err(index) => {
                self.nodes.insert(index, node);
                Ok(index)
            }
        }
    }

    fn remove(&mut self, index: usize) -> Option<N> {
        (index < self.nodes.len()).then(|| self.nodes.remove(index))
    }

    fn get_mut(&mut self, index: usize) -> MathResult<&mut N> {
        self.nodes.get_mut(index).ok_or_else(|| no_node(index))
    }

    fn set_time(&mut self, index: usize, time: BigRational) -> MathResult<usize> {
        if index >= self.nodes.len() {
            return Err(no_node(index));
        }
        if let Ok(other) = self.position(&time)
            && other != index
        {
            return Err(duplicate_time(&time));
        }

        let mut node = self.nodes.remove(index);
        node.set_time(time);
        let (Ok(new_index) | Err(new_index)) = self.position(node.time());
        self.nodes.insert(new_index, node);
        Ok(new_index)
    }

    fn times(&self) -> Vec<BigRational> {
        self.nodes.iter().map(|n| n.time().clone()).collect()
    }
}

fn duplicate_time(time: &BigRational) -> MathError {
    MathError::InvalidInput(format!("a node with time {} already exists", time))
}

fn no_node(index: usize) -> MathError {
    MathError::InvalidInput(format!("no node at index {}", index))
}

/// A plane curve given by nodes, and its coordinate polynomials once
/// interpolated.
#[derive(Debug, Clone)]
pub struct Curve {
    nodes: SortedNodes<CurveNode>,
    polys: Option<(Polynomial, Polynomial)>,
}

impl Curve {
    /// Create a curve from nodes in any order.
    pub fn new(nodes: Vec<CurveNode>) -> MathResult<Self> {
        Ok(Self {
            nodes: SortedNodes::new(nodes)?,
            polys: None,
        })
    }

    /// Create a curve with previously computed coordinate polynomials.
    pub fn with_polynomials(
        nodes: Vec<CurveNode>,
        x: Polynomial,
        y: Polynomial,
    ) -> MathResult<Self> {
        Ok(Self {
            nodes: SortedNodes::new(nodes)?,
            polys: Some((x, y)),
        })
    }

    /// Nodes, sorted by time.
    #[inline]
    pub fn nodes(&self) -> &[CurveNode] {
        &self.nodes.nodes
    }

    /// Node times, increasing.
    pub fn times(&self) -> Vec<BigRational> {
        self.nodes.times()
    }

    /// Add a node; returns its index. Fails if its time is already taken.
    pub fn add_node(&mut self, node: CurveNode) -> MathResult<usize> {
        let index = self.nodes.insert(node)?;
        self.polys = None;
        Ok(index)
    }

    /// Remove the node at `index`.
    pub fn remove_node(&mut self, index: usize) -> Option<CurveNode> {
        let node = self.nodes.remove(index)?;
        self.polys = None;
        Some(node)
    }

    /// Move the node at `index` to time `time`; returns its new index.
    pub fn set_time(&mut self, index: usize, time: BigRational) -> MathResult<usize> {
        let new_index = self.nodes.set_time(index, time)?;
        self.polys = None;
        Ok(new_index)
    }

    /// Replace the point of the node at `index`.
    pub fn set_point(&mut self, index: usize, point: Point) -> MathResult<()> {
        self.nodes.get_mut(index)?.point = point;
        self.polys = None;
        Ok(())
    }

    /// Replace the derivative vectors of the node at `index`.
    pub fn set_derivatives(
        &mut self,
        index: usize,
        derivatives: Vec<(BigRational, BigRational)>,
    ) -> MathResult<()> {
        self.nodes.get_mut(index)?.derivatives = derivatives;
        self.polys = None;
        Ok(())
    }

    /// Compute and store the coordinate polynomials.
    pub fn interpolate(&mut self) -> MathResult<()> {
        self.polys = Some(interpolate_curve(self.nodes())?);
        Ok(())
    }

    /// True once [`Curve::interpolate`] has run since the last edit.
    #[inline]
    pub fn is_interpolated(&self) -> bool {
        self.polys.is_some()
    }

    /// First coordinate polynomial, if interpolated.
    pub fn x_poly(&self) -> Option<&Polynomial> {
        self.polys.as_ref().map(|(x, _)| x)
    }

    /// Second coordinate polynomial, if interpolated.
    pub fn y_poly(&self) -> Option<&Polynomial> {
        self.polys.as_ref().map(|(_, y)| y)
    }

    fn polynomials(&self) -> MathResult<(&Polynomial, &Polynomial)> {
        self.polys
            .as_ref()
            .map(|(x, y)| (x, y))
            .ok_or(MathError::NotInterpolated)
    }

    /// The point of the curve at parameter `t`.
    pub fn evaluate(&self, t: &BigRational) -> MathResult<Point> {
        let (x, y) = self.polynomials()?;
        Ok((x.eval(t), y.eval(t)))
    }

    /// Number of crossings with `line` for parameters in `(t0, t1)`.
    pub fn count_intersections(
        &self,
        line: &Line,
        t0: &BigRational,
        t1: &BigRational,
    ) -> MathResult<usize> {
        let (x, y) = self.polynomials()?;
        count_intersections(x, y, line, t0, t1)
    }

    /// Crossing counts with each polygon edge for parameters in `(t0, t1)`.
    pub fn count_polygon_crossings(
        &self,
        edges: &[Line],
        t0: &BigRational,
        t1: &BigRational,
    ) -> MathResult<Vec<usize>> {
        let (x, y) = self.polynomials()?;
        count_polygon_crossings(x, y, edges, t0, t1)
    }

    /// The coordinate polynomials composed with a reparametrization `r`:
    /// `(x(r(t)), y(r(t)))`.
    pub fn reparametrize(&self, r: &Polynomial) -> MathResult<(Polynomial, Polynomial)> {
        let (x, y) = self.polynomials()?;
        Ok((x.compose(r), y.compose(r)))
    }
}

/// A real function given by 1-D nodes, and its polynomial once interpolated.
#[derive(Debug, Clone)]
pub struct ScalarCurve {
    nodes: SortedNodes<Node>,
    poly: Option<Polynomial>,
}

impl ScalarCurve {
    /// Create from nodes in any order.
    pub fn new(nodes: Vec<Node>) -> MathResult<Self> {
        Ok(Self {
            nodes: SortedNodes::new(nodes)?,
            poly: None,
        })
    }

    /// Nodes, sorted by time.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes.nodes
    }

    /// Node times, increasing.
    pub fn times(&self) -> Vec<BigRational> {
        self.nodes.times()
    }

    /// Add a node; returns its index. Fails if its time is already taken.
    pub fn add_node(&mut self, node: Node) -> MathResult<usize> {
        let index = self.nodes.insert(node)?;
        self.poly = None;
        Ok(index)
    }

    /// Remove the node at `index`.
    pub fn remove_node(&mut self, index: usize) -> Option<Node> {
        let node = self.nodes.remove(index)?;
        self.poly = None;
        Some(node)
    }

    /// Move the node at `index` to time `time`; returns its new index.
    pub fn set_time(&mut self, index: usize, time: BigRational) -> MathResult<usize> {
        let new_index = self.nodes.set_time(index, time)?;
        self.poly = None;
        Ok(new_index)
    }

    /// Replace the value of the node at `index`.
    pub fn set_value(&mut self, index: usize, value: BigRational) -> MathResult<()> {
        self.nodes.get_mut(index)?.value = value;
        self.poly = None;
        Ok(())
    }

    /// Replace the derivatives of the node at `index`.
    pub fn set_derivatives(
        &mut self,
        index: usize,
        derivatives: Vec<BigRational>,
    ) -> MathResult<()> {
        self.nodes.get_mut(index)?.derivatives = derivatives;
        self.poly = None;
        Ok(())
    }

    /// Compute and store the interpolating polynomial.
    pub fn interpolate(&mut self) -> MathResult<&Polynomial> {
        let poly = interpolate(self.nodes())?;
        Ok(&*self.poly.insert(poly))
    }

    /// True once [`ScalarCurve::interpolate`] has run since the last edit.
    #[inline]
    pub fn is_interpolated(&self) -> bool {
        self.poly.is_some()
    }

    /// The interpolating polynomial, if computed.
    #[inline]
    pub fn poly(&self) -> Option<&Polynomial> {
        self.poly.as_ref()
    }

    /// Value at parameter `t`.
    pub fn evaluate(&self, t: &BigRational) -> MathResult<BigRational> {
        self.poly
            .as_ref()
            .map(|p| p.eval(t))
            .ok_or(MathError::NotInterpolated)
    }
}
