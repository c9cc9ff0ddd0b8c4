/// Disjoint sets over `0..n` with path compression, union by rank and per-root sizes.
#[derive(Clone, Debug)]
pub struct UnionFind {
	parent: Vec<usize>,
	rank: Vec<u32>,
	size: Vec<usize>,
}

impl UnionFind {
	pub fn new(n: usize) -> Self {
		Self {
			parent: (0..n).collect(),
			rank: vec![0; n],
			size: vec![1; n],
		}
	}

	pub fn len(&self) -> usize {
		self.parent.len()
	}

	pub fn is_empty(&self) -> bool {
		self.parent.is_empty()
	}

	pub fn find(&mut self, x: usize) -> usize {
		let mut root = x;
		while self.parent[root] != root {
			root = self.parent[root];
		}
		let mut cur = x;
		while self.parent[cur] != root {
			let next = self.parent[cur];
			self.parent[cur] = root;
			cur = next;
		}
		root
	}

	/// Merges the sets holding `x` and `y`. Returns `false` if they were already one set.
	pub fn union(&mut self, x: usize, y: usize) -> bool {
		let (root_x, root_y) = (self.find(x), self.find(y));
		if root_x == root_y {
			return false;
		}

		// Ties keep `x`'s root on top.
		let (parent, child) = if self.rank[root_x] < self.rank[root_y] {
			(root_y, root_x)
		} else {
			(root_x, root_y)
		};
		if self.rank[root_x] == self.rank[root_y] {
			self.rank[parent] += 1;
		}
		self.parent[child] = parent;
		self.size[parent] += self.size[child];
		true
	}

	pub fn connected(&mut self, x: usize, y: usize) -> bool {
		self.find(x) == self.find(y)
	}

	pub fn component_size(&mut self, x: usize) -> usize {
		let root = self.find(x);
		self.size[root]
	}
}
