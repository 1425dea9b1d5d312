//! Batch generation: a pull-based sequence of `count` values.

use crate::codec::CanonicalUuid;
use crate::generator::{Derivation, GenerationRequest, UuidGenerator};
use crate::namespace;
use crate::{clock::Clock, UuidError, UuidResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lazily generates the values of a [`GenerationRequest`] in call order.
///
/// Each item is the canonical lowercase text of one value. Name-based batches repeat the same
/// value `count` times, since the derivation is deterministic.
///
/// If an interrupt flag is attached with [`Batch::with_interrupt`] and becomes set, the next
/// item is [`UuidError::Interrupted`] and the sequence ends.
pub struct Batch<'a, C: Clock> {
    generator: &'a mut UuidGenerator<C>,
    derivation: &'a Derivation,
    remaining: usize,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<'a, C: Clock> Batch<'a, C> {
    pub fn new(generator: &'a mut UuidGenerator<C>, request: &'a GenerationRequest) -> Self {
        let derivation = request.derivation();
        match derivation {
            Derivation::Md5 { namespace: ns, .. } | Derivation::Sha1 { namespace: ns, .. } => {
                tracing::debug!(
                    scheme = %request.scheme(),
                    count = request.count(),
                    namespace = namespace::name_of(ns).unwrap_or("custom"),
                    "starting batch"
                );
            }
            _ => {
                tracing::debug!(
                    scheme = %request.scheme(),
                    count = request.count(),
                    "starting batch"
                );
            }
        }

        Self {
            generator,
            derivation,
            remaining: request.count(),
            interrupt: None,
        }
    }

    /// Stops the batch once `flag` is set.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }
}

impl<C: Clock> Iterator for Batch<'_, C> {
    type Item = UuidResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        if let Some(flag) = &self.interrupt {
            if flag.load(Ordering::SeqCst) {
                self.remaining = 0;
                return Some(Err(UuidError::Interrupted));
            }
        }

        self.remaining -= 1;
        let uuid = self.generator.generate(self.derivation);
        Some(Ok(CanonicalUuid::from(uuid).to_string()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<C: Clock> ExactSizeIterator for Batch<'_, C> {}
