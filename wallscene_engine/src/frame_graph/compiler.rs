/// Frame graph compilation: culling, ordering and storage assignment.
///
/// 1. Culling walks backward from the side-effect roots over content
///    dependencies (read-after-write and version chains).
/// 2. Ordering is Kahn's algorithm over read-after-write, write-after-write
///    and write-after-read edges, always picking the lowest declaration
///    index among ready passes, so the order is deterministic.
/// 3. Temporary render-target textures with the same size policy and
///    disjoint lifetimes share one physical slot.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use rustc_hash::FxHashSet;
use crate::error::{Error, Result};
use super::{PassDeclaration, PassId, ResourceRegistry, SizePolicy, TextureSource};

/// Backing storage shared by one or more virtual textures
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalSlot {
    pub size: SizePolicy,
    /// Virtual textures aliased onto this slot, in first-use order
    pub textures: Vec<usize>,
    /// Execution position of the last use of the most recent texture
    last_use: usize,
}

/// Result of `FrameGraph::compile`
#[derive(Debug, Clone, Default)]
pub struct CompiledGraph {
    /// Surviving passes in execution order
    pub order: Vec<PassId>,
    /// Passes removed by culling, in declaration order
    pub culled: Vec<PassId>,
    /// Physical slot of each render-target texture (None for images and unused textures)
    pub texture_slots: Vec<Option<usize>>,
    pub slots: Vec<PhysicalSlot>,
    /// Image textures read by surviving passes
    pub images: Vec<usize>,
}

impl CompiledGraph {
    pub fn position(&self, pass: PassId) -> Option<usize> {
        self.order.iter().position(|p| *p == pass)
    }
}

pub(crate) fn compile(registry: &ResourceRegistry, passes: &[PassDeclaration], names: &[String]) -> Result<CompiledGraph> {
    let alive = cull(registry, passes);
    let order = order(registry, passes, names, &alive)?;
    let culled = (0..passes.len()).filter(|i| !alive[*i]).map(|i| PassId(i as u32)).collect();
    let (texture_slots, slots, images) = assign_storage(registry, passes, &order);

    Ok(CompiledGraph { order, culled, texture_slots, slots, images })
}

// ============================================================================
// Culling
// ============================================================================

fn cull(registry: &ResourceRegistry, passes: &[PassDeclaration]) -> Vec<bool> {
    let roots: Vec<usize> = passes
        .iter()
        .enumerate()
        .filter(|(_, p)| p.writes.is_empty() || p.side_effect)
        .map(|(i, _)| i)
        .collect();

    if roots.is_empty() {
        return vec![true; passes.len()];
    }

    let mut alive = vec![false; passes.len()];
    let mut stack = roots;
    while let Some(index) = stack.pop() {
        if alive[index] {
            continue;
        }
        alive[index] = true;

        let pass = &passes[index];
        let read_writers = pass.reads.iter().filter_map(|r| registry.writer(*r));
        let previous_writers = pass
            .writes
            .iter()
            .filter_map(|w| registry.previous(*w))
            .filter_map(|prev| registry.writer(prev));
        for writer in read_writers.chain(previous_writers) {
            if !alive[writer.index()] {
                stack.push(writer.index());
            }
        }
    }
    alive
}

// ============================================================================
// Ordering
// ============================================================================

fn order(registry: &ResourceRegistry, passes: &[PassDeclaration], names: &[String], alive: &[bool]) -> Result<Vec<PassId>> {
    let count = passes.len();
    let mut successors: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); count];

    let mut add_edge = |from: usize, to: usize| -> Result<()> {
        if from == to {
            return Err(Error::GraphConstruction(format!(
                "pass '{}' depends on itself (it reads a version it overwrites)", names[to]
            )));
        }
        successors[from].insert(to);
        Ok(())
    };

    for (index, pass) in passes.iter().enumerate().filter(|(i, _)| alive[*i]) {
        // read after write
        for read in &pass.reads {
            if let Some(writer) = registry.writer(*read).filter(|w| alive[w.index()]) {
                add_edge(writer.index(), index)?;
            }
        }
        for write in &pass.writes {
            let Some(previous) = registry.previous(*write) else { continue };
            // write after write
            if let Some(writer) = registry.writer(previous).filter(|w| alive[w.index()]) {
                add_edge(writer.index(), index)?;
            }
            // write after read
            for reader in registry.readers(previous).iter().filter(|r| alive[r.index()]) {
                add_edge(reader.index(), index)?;
            }
        }
    }

    let mut in_degree = vec![0usize; count];
    for targets in &successors {
        for target in targets {
            in_degree[*target] += 1;
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..count)
        .filter(|i| alive[*i] && in_degree[*i] == 0)
        .map(Reverse)
        .collect();
    let mut order = Vec::with_capacity(count);

    while let Some(Reverse(index)) = ready.pop() {
        order.push(PassId(index as u32));
        let mut next: Vec<usize> = successors[index].iter().copied().collect();
        next.sort_unstable();
        for target in next {
            in_degree[target] -= 1;
            if in_degree[target] == 0 {
                ready.push(Reverse(target));
            }
        }
    }

    let alive_count = alive.iter().filter(|a| **a).count();
    if order.len() < alive_count {
        let stuck: Vec<&str> = (0..count)
            .filter(|i| alive[*i] && in_degree[*i] > 0)
            .map(|i| names[i].as_str())
            .collect();
        return Err(Error::GraphConstruction(format!(
            "dependency cycle between passes [{}]", stuck.join(", ")
        )));
    }
    Ok(order)
}

// ============================================================================
// Storage assignment
// ============================================================================

fn assign_storage(
    registry: &ResourceRegistry,
    passes: &[PassDeclaration],
    order: &[PassId],
) -> (Vec<Option<usize>>, Vec<PhysicalSlot>, Vec<usize>) {
    let texture_count = registry.texture_count();
    let mut first_use: Vec<Option<usize>> = vec![None; texture_count];
    let mut last_use: Vec<Option<usize>> = vec![None; texture_count];

    for (position, pass) in order.iter().enumerate() {
        let declaration = &passes[pass.index()];
        for handle in declaration.reads.iter().chain(declaration.writes.iter()) {
            if let Some(texture) = registry.texture_index(*handle) {
                first_use[texture].get_or_insert(position);
                last_use[texture] = Some(position);
            }
        }
    }

    let mut used: Vec<usize> = (0..texture_count).filter(|t| first_use[*t].is_some()).collect();
    used.sort_by_key(|t| (first_use[*t], *t));

    let mut texture_slots = vec![None; texture_count];
    let mut slots: Vec<PhysicalSlot> = Vec::new();
    let mut images = Vec::new();

    for texture in used {
        let desc = &registry.textures[texture].desc;
        if let TextureSource::Image { .. } = desc.source {
            images.push(texture);
            continue;
        }
        let (Some(first), Some(last)) = (first_use[texture], last_use[texture]) else { continue };

        let reusable = if desc.temporary {
            slots.iter().position(|slot| {
                slot.size == desc.size
                    && slot.last_use < first
                    && slot.textures.iter().all(|t| {
                        let other = &registry.textures[*t].desc;
                        other.temporary && other.format == desc.format
                    })
            })
        } else {
            None
        };

        let slot = match reusable {
            Some(slot) => {
                slots[slot].textures.push(texture);
                slots[slot].last_use = last;
                slot
            }
            None => {
                slots.push(PhysicalSlot { size: desc.size, textures: vec![texture], last_use: last });
                slots.len() - 1
            }
        };
        texture_slots[texture] = Some(slot);
    }

    (texture_slots, slots, images)
}
