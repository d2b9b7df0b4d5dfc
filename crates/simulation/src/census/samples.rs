//! Bounded head/tail sampling of entities for spot checks.

use bevy::prelude::*;
use std::collections::VecDeque;
use std::fmt::Write;

use crate::config::SAMPLE_MAX;

/// First `cap` entities seen plus a rolling window of the last `cap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadTailSamples {
    head: Vec<Entity>,
    tail: VecDeque<Entity>,
    cap: usize,
    seen: usize,
}

impl Default for HeadTailSamples {
    fn default() -> Self {
        Self::with_cap(SAMPLE_MAX)
    }
}

impl HeadTailSamples {
    pub fn with_cap(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            head: Vec::with_capacity(cap),
            tail: VecDeque::with_capacity(cap),
            cap,
            seen: 0,
        }
    }

    pub fn push(&mut self, entity: Entity) {
        self.seen += 1;
        if self.head.len() < self.cap {
            self.head.push(entity);
        }
        if self.tail.len() == self.cap {
            self.tail.pop_front();
        }
        self.tail.push_back(entity);
    }

    pub fn head(&self) -> &[Entity] {
        &self.head
    }

    pub fn tail(&self) -> impl Iterator<Item = Entity> + '_ {
        self.tail.iter().copied()
    }

    pub fn seen(&self) -> usize {
        self.seen
    }

    pub fn format_head(&self) -> String {
        format_entities(self.head.iter().copied())
    }

    pub fn format_tail(&self) -> String {
        format_entities(self.tail())
    }
}

/// `index:generation` list, or `<none>`.
pub fn format_entities(entities: impl IntoIterator<Item = Entity>) -> String {
    let mut out = String::new();
    for (i, e) in entities.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}:{}", e.index(), e.generation());
    }
    if out.is_empty() {
        out.push_str("<none>");
    }
    out
}
