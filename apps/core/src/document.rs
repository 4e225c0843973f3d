//! In-process live document.
//!
//! Cards are kept in document order; `processed` / `productive` markers live in
//! a side-table keyed by [`ItemId`]. [`SharedDocument`] wraps the document for
//! concurrent use and broadcasts a [`DocumentEvent`] after every structural change
//! or navigation, the way a mutation observer would.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::AppError;
use crate::models::{Card, CardState, ItemId, Markers};
use crate::scanner::ItemCollection;

/// Capacity of the event channel. Slow observers see `Lagged` and rescan.
const EVENT_CAPACITY: usize = 64;

/// Notification emitted by [`SharedDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Cards were added, removed or re-rendered.
    StructureChanged,
    /// A page navigation replaced the document content.
    NavigationFinished,
}

/// The live card collection and its marker side-table.
#[derive(Debug, Default)]
pub struct Document {
    order: Vec<ItemId>,
    cards: HashMap<ItemId, Card>,
    markers: HashMap<ItemId, Markers>,
    active_attribute: Option<bool>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a card and returns its id.
    pub fn insert(&mut self, card: Card) -> ItemId {
        let id = ItemId::new();
        self.order.push(id);
        self.cards.insert(id, card);
        id
    }

    /// Removes a card together with its markers.
    pub fn remove(&mut self, id: ItemId) -> Option<Card> {
        let card = self.cards.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        self.markers.remove(&id);
        Some(card)
    }

    /// Replaces a card's content in place. Markers are kept, matching an element
    /// whose children re-render without the element itself being replaced.
    pub fn update(&mut self, id: ItemId, card: Card) -> bool {
        match self.cards.get_mut(&id) {
            Some(existing) => {
                *existing = card;
                true
            }
            None => false,
        }
    }

    /// Drops every card and inserts `cards` in order.
    pub fn replace_all(&mut self, cards: Vec<Card>) -> Vec<ItemId> {
        self.order.clear();
        self.cards.clear();
        self.markers.clear();
        cards.into_iter().map(|card| self.insert(card)).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.order
    }

    pub fn card(&self, id: ItemId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Markers of an item; unmarked and unknown items report the default.
    pub fn markers(&self, id: ItemId) -> Markers {
        self.markers.get(&id).copied().unwrap_or_default()
    }

    /// Last mode asserted by the scanner, `None` before the first assertion.
    pub fn active_attribute(&self) -> Option<bool> {
        self.active_attribute
    }

    pub fn processed_count(&self) -> usize {
        self.markers.values().filter(|m| m.processed).count()
    }

    pub fn productive_count(&self) -> usize {
        self.markers
            .values()
            .filter(|m| m.processed && m.productive)
            .count()
    }

    /// Whether the card is currently revealed.
    pub fn is_revealed(&self, id: ItemId) -> bool {
        let markers = self.markers(id);
        self.active_attribute == Some(true) && markers.processed && markers.productive
    }

    /// Snapshot of every card with its markers, in document order.
    pub fn card_states(&self) -> Vec<CardState> {
        self.order
            .iter()
            .filter_map(|id| {
                let card = self.cards.get(id)?;
                let markers = self.markers(*id);
                Some(CardState {
                    id: *id,
                    kind: card.kind,
                    title: card.title.clone(),
                    metadata: card.metadata.clone(),
                    processed: markers.processed,
                    productive: markers.productive,
                })
            })
            .collect()
    }
}

impl ItemCollection for Document {
    fn query_unprocessed(&self) -> Vec<ItemId> {
        self.order
            .iter()
            .filter(|id| {
                self.cards
                    .get(*id)
                    .map(|card| card.kind.is_candidate())
                    .unwrap_or(false)
            })
            .filter(|id| !self.markers(**id).processed)
            .copied()
            .collect()
    }

    fn title(&self, id: ItemId) -> Option<&str> {
        self.cards.get(&id)?.title.as_deref()
    }

    fn metadata(&self, id: ItemId) -> Option<&str> {
        self.cards.get(&id)?.metadata.as_deref()
    }

    fn set_markers(&mut self, id: ItemId, productive: bool) {
        if self.cards.contains_key(&id) {
            self.markers.insert(
                id,
                Markers {
                    processed: true,
                    productive,
                },
            );
        }
    }

    fn processed_items(&self) -> Vec<ItemId> {
        self.order
            .iter()
            .filter(|id| self.markers(**id).processed)
            .copied()
            .collect()
    }

    fn clear_markers(&mut self, id: ItemId) {
        self.markers.remove(&id);
    }

    fn set_active_attribute(&mut self, active: bool) {
        self.active_attribute = Some(active);
    }
}

/// Thread-safe handle to a [`Document`] that notifies observers of changes.
#[derive(Clone)]
pub struct SharedDocument {
    inner: Arc<Mutex<Document>>,
    events: broadcast::Sender<DocumentEvent>,
}

impl Default for SharedDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedDocument {
    pub fn new() -> Self {
        Self::from_document(Document::new())
    }

    pub fn from_document(document: Document) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(document)),
            events,
        }
    }

    /// Receives every event emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
        self.events.subscribe()
    }

    /// Locks the document. Mutations made through the guard emit no event.
    pub fn lock(&self) -> Result<MutexGuard<'_, Document>, AppError> {
        Ok(self.inner.lock()?)
    }

    /// Runs `f` against the document without emitting events.
    pub fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> Result<T, AppError> {
        let doc = self.lock()?;
        Ok(f(&doc))
    }

    pub fn insert(&self, card: Card) -> Result<ItemId, AppError> {
        let id = self.lock()?.insert(card);
        self.emit(DocumentEvent::StructureChanged);
        Ok(id)
    }

    pub fn extend(&self, cards: Vec<Card>) -> Result<Vec<ItemId>, AppError> {
        let ids = {
            let mut doc = self.lock()?;
            cards.into_iter().map(|card| doc.insert(card)).collect()
        };
        self.emit(DocumentEvent::StructureChanged);
        Ok(ids)
    }

    pub fn remove(&self, id: ItemId) -> Result<Option<Card>, AppError> {
        let removed = self.lock()?.remove(id);
        if removed.is_some() {
            self.emit(DocumentEvent::StructureChanged);
        }
        Ok(removed)
    }

    pub fn update(&self, id: ItemId, card: Card) -> Result<bool, AppError> {
        let updated = self.lock()?.update(id, card);
        if updated {
            self.emit(DocumentEvent::StructureChanged);
        }
        Ok(updated)
    }

    /// Replaces the whole document, as a single-page navigation does.
    pub fn navigate(&self, cards: Vec<Card>) -> Result<Vec<ItemId>, AppError> {
        let ids = self.lock()?.replace_all(cards);
        self.emit(DocumentEvent::NavigationFinished);
        Ok(ids)
    }

    fn emit(&self, event: DocumentEvent) {
        // No receivers is fine: nothing is observing yet.
        if self.events.send(event).is_err() {
            debug!(?event, "document event dropped, no observers");
        }
    }
}
