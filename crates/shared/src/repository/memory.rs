//! In-process implementation of every repository trait.
//!
//! Row locks are per-id `tokio` mutexes held by a [`MemoryTransaction`] until
//! it commits or is dropped, and forgotten once no transaction holds or awaits
//! them. Writes made inside a transaction are buffered and become visible to
//! other readers only on commit, all at once.

use crate::{
    abstract_trait::{
        block_request::BlockRequestQueryRepositoryTrait,
        card::repository::{
            CardCommandRepositoryTrait, CardQueryRepositoryTrait, CardStoreTrait,
            CardTransactionTrait,
        },
        user::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    },
    domain::requests::FindAllCards,
    errors::RepositoryError,
    model::{
        block_request::{BlockRequestModel, BlockRequestStatus},
        card::CardModel,
        user::UserModel,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicU32, Ordering},
    },
};
use tokio::sync::{Mutex as RowLock, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, UserModel>,
    cards: HashMap<Uuid, CardModel>,
    block_requests: HashMap<Uuid, BlockRequestModel>,
}

impl State {
    fn has_other_active_request(&self, request: &BlockRequestModel) -> bool {
        self.block_requests.values().any(|existing| {
            existing.id != request.id
                && existing.card_id == request.card_id
                && existing.status == BlockRequestStatus::Active
        })
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    row_locks: Arc<Mutex<HashMap<Uuid, Arc<RowLock<()>>>>>,
    failing_commits: Arc<AtomicU32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `n` commits fail with a write conflict.
    pub fn fail_next_commits(&self, n: u32) {
        self.failing_commits.store(n, Ordering::SeqCst);
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn row_lock(&self, id: Uuid) -> Arc<RowLock<()>> {
        let mut locks = self
            .row_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(id).or_default().clone()
    }

    /// Forgets row locks nobody holds or waits on any more.
    fn release_row_locks(&self, ids: impl IntoIterator<Item = Uuid>) {
        let mut locks = self
            .row_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for id in ids {
            if locks.get(&id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
                locks.remove(&id);
            }
        }
    }

    fn take_injected_conflict(&self) -> bool {
        self.failing_commits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl CardStoreTrait for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn CardTransactionTrait>, RepositoryError> {
        Ok(Box::new(MemoryTransaction {
            store: self.clone(),
            held: HashMap::new(),
            cards: HashMap::new(),
            block_requests: HashMap::new(),
        }))
    }
}

pub struct MemoryTransaction {
    store: MemoryStore,
    held: HashMap<Uuid, OwnedMutexGuard<()>>,
    cards: HashMap<Uuid, CardModel>,
    block_requests: HashMap<Uuid, BlockRequestModel>,
}

impl MemoryTransaction {
    async fn lock(&mut self, id: Uuid) {
        if self.held.contains_key(&id) {
            return;
        }
        let lock = self.store.row_lock(id);
        let guard = lock.lock_owned().await;
        self.held.insert(id, guard);
    }

    fn card(&self, id: Uuid) -> Option<CardModel> {
        self.cards
            .get(&id)
            .cloned()
            .or_else(|| self.store.state().cards.get(&id).cloned())
    }

    fn block_request(&self, id: Uuid) -> Option<BlockRequestModel> {
        self.block_requests
            .get(&id)
            .cloned()
            .or_else(|| self.store.state().block_requests.get(&id).cloned())
    }

    fn request_view(&self) -> HashMap<Uuid, BlockRequestModel> {
        let mut view = self.store.state().block_requests.clone();
        view.extend(
            self.block_requests
                .iter()
                .map(|(id, request)| (*id, request.clone())),
        );
        view
    }
}

#[async_trait]
impl CardTransactionTrait for MemoryTransaction {
    async fn find_by_id_for_update(
        &mut self,
        id: Uuid,
    ) -> Result<Option<CardModel>, RepositoryError> {
        self.lock(id).await;
        Ok(self.card(id))
    }

    async fn find_by_id_for_owner_for_update(
        &mut self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<CardModel>, RepositoryError> {
        self.lock(id).await;
        Ok(self.card(id).filter(|card| card.user_id == owner_id))
    }

    async fn save(&mut self, card: &CardModel) -> Result<CardModel, RepositoryError> {
        self.lock(card.id).await;

        let mut saved = card.clone();
        saved.updated_at = Some(Utc::now().naive_utc());
        self.cards.insert(saved.id, saved.clone());

        Ok(saved)
    }

    async fn exists_block_request(
        &mut self,
        card_id: Uuid,
        status: BlockRequestStatus,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .request_view()
            .values()
            .any(|request| request.card_id == card_id && request.status == status))
    }

    async fn insert_block_request(
        &mut self,
        request: &BlockRequestModel,
    ) -> Result<BlockRequestModel, RepositoryError> {
        if request.status == BlockRequestStatus::Active
            && self.request_view().values().any(|existing| {
                existing.card_id == request.card_id
                    && existing.status == BlockRequestStatus::Active
            })
        {
            return Err(RepositoryError::AlreadyExists(format!(
                "active block request for card {}",
                request.card_id
            )));
        }

        self.lock(request.id).await;
        self.block_requests.insert(request.id, request.clone());

        Ok(request.clone())
    }

    async fn find_block_request(
        &mut self,
        id: Uuid,
    ) -> Result<Option<BlockRequestModel>, RepositoryError> {
        Ok(self.block_request(id))
    }

    async fn find_block_request_for_update(
        &mut self,
        id: Uuid,
    ) -> Result<Option<BlockRequestModel>, RepositoryError> {
        self.lock(id).await;
        Ok(self.block_request(id))
    }

    async fn update_block_request_status(
        &mut self,
        id: Uuid,
        status: BlockRequestStatus,
    ) -> Result<BlockRequestModel, RepositoryError> {
        self.lock(id).await;

        let mut request = self.block_request(id).ok_or(RepositoryError::NotFound)?;
        request.status = status;
        self.block_requests.insert(id, request.clone());

        Ok(request)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let mut tx = self;

        if tx.store.take_injected_conflict() {
            return Err(RepositoryError::Conflict(
                "could not serialize access due to concurrent update".into(),
            ));
        }

        let store = tx.store.clone();
        let mut state = store.state();

        for card in tx.cards.values() {
            if card.balance.is_sign_negative() && !card.balance.is_zero() {
                return Err(RepositoryError::Custom(format!(
                    "balance of card {} would become negative",
                    card.id
                )));
            }
            if !state.users.contains_key(&card.user_id) {
                return Err(RepositoryError::ForeignKey(format!(
                    "user {} does not exist",
                    card.user_id
                )));
            }
        }

        for request in tx.block_requests.values() {
            if !state.cards.contains_key(&request.card_id)
                && !tx.cards.contains_key(&request.card_id)
            {
                return Err(RepositoryError::ForeignKey(format!(
                    "card {} does not exist",
                    request.card_id
                )));
            }
            if request.status == BlockRequestStatus::Active
                && state.has_other_active_request(request)
            {
                return Err(RepositoryError::AlreadyExists(format!(
                    "active block request for card {}",
                    request.card_id
                )));
            }
        }

        state.cards.extend(std::mem::take(&mut tx.cards));
        state
            .block_requests
            .extend(std::mem::take(&mut tx.block_requests));

        Ok(())
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        let ids: Vec<Uuid> = self.held.drain().map(|(id, _guard)| id).collect();
        self.store.release_row_locks(ids);
    }
}

#[async_trait]
impl CardQueryRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CardModel>, RepositoryError> {
        Ok(self.state().cards.get(&id).cloned())
    }

    async fn find_by_id_for_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<CardModel>, RepositoryError> {
        Ok(self
            .state()
            .cards
            .get(&id)
            .filter(|card| card.user_id == owner_id)
            .cloned())
    }

    async fn find_all(
        &self,
        filter: &FindAllCards,
    ) -> Result<(Vec<CardModel>, i64), RepositoryError> {
        let mut matching: Vec<CardModel> = self
            .state()
            .cards
            .values()
            .filter(|card| filter.matches(card))
            .cloned()
            .collect();

        matching.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        let total = matching.len() as i64;
        let offset = usize::try_from(filter.offset()).unwrap_or(0);
        let limit = usize::try_from(filter.page_size).unwrap_or(0);

        let page = matching.into_iter().skip(offset).take(limit).collect();

        Ok((page, total))
    }
}

#[async_trait]
impl CardCommandRepositoryTrait for MemoryStore {
    async fn create(&self, card: &CardModel) -> Result<CardModel, RepositoryError> {
        let mut state = self.state();

        if !state.users.contains_key(&card.user_id) {
            return Err(RepositoryError::ForeignKey(format!(
                "user {} does not exist",
                card.user_id
            )));
        }
        if state.cards.contains_key(&card.id)
            || state
                .cards
                .values()
                .any(|existing| existing.card_number == card.card_number)
        {
            return Err(RepositoryError::AlreadyExists("card".into()));
        }

        let now = Utc::now().naive_utc();
        let mut created = card.clone();
        created.created_at = Some(now);
        created.updated_at = Some(now);
        state.cards.insert(created.id, created.clone());

        Ok(created)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let lock = self.row_lock(id);
        let guard = lock.lock_owned().await;

        let removed = {
            let mut state = self.state();
            let removed = state.cards.remove(&id).is_some();
            state.block_requests.retain(|_, request| request.card_id != id);
            removed
        };

        drop(guard);
        self.release_row_locks([id]);

        if removed {
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}

#[async_trait]
impl BlockRequestQueryRepositoryTrait for MemoryStore {
    async fn find_active(&self) -> Result<Vec<BlockRequestModel>, RepositoryError> {
        let mut active: Vec<BlockRequestModel> = self
            .state()
            .block_requests
            .values()
            .filter(|request| request.status == BlockRequestStatus::Active)
            .cloned()
            .collect();

        active.sort_by_key(|request| request.requested_at);
        Ok(active)
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for MemoryStore {
    async fn find_all(&self) -> Result<Vec<UserModel>, RepositoryError> {
        let mut users: Vec<UserModel> = self.state().users.values().cloned().collect();
        users.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(users)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserModel>, RepositoryError> {
        Ok(self.state().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        Ok(self
            .state()
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for MemoryStore {
    async fn create(&self, user: &UserModel) -> Result<UserModel, RepositoryError> {
        let mut state = self.state();

        if state.users.values().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::AlreadyExists(format!(
                "email {}",
                user.email
            )));
        }

        let now = Utc::now().naive_utc();
        let mut created = user.clone();
        created.created_at = Some(now);
        created.updated_at = Some(now);
        state.users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update(&self, user: &UserModel) -> Result<UserModel, RepositoryError> {
        let mut state = self.state();

        if state
            .users
            .values()
            .any(|existing| existing.email == user.email && existing.id != user.id)
        {
            return Err(RepositoryError::AlreadyExists(format!(
                "email {}",
                user.email
            )));
        }

        let stored = state.users.get_mut(&user.id).ok_or(RepositoryError::NotFound)?;
        *stored = UserModel {
            created_at: stored.created_at,
            updated_at: Some(Utc::now().naive_utc()),
            ..user.clone()
        };

        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut state = self.state();

        if state.users.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }

        state.cards.retain(|_, card| card.user_id != id);
        let State {
            cards,
            block_requests,
            ..
        } = &mut *state;
        block_requests
            .retain(|_, request| request.user_id != id && cards.contains_key(&request.card_id));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{card::CardStatus, user::UserRole};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    async fn seed(store: &MemoryStore) -> CardModel {
        let user = UserCommandRepositoryTrait::create(
            store,
            &UserModel {
                id: Uuid::new_v4(),
                first_name: "Ivan".into(),
                last_name: "Ivanov".into(),
                email: "ivan@example.com".into(),
                phone_number: "89161234567".into(),
                password: "hash".into(),
                role: UserRole::User,
                created_at: None,
                updated_at: None,
            },
        )
        .await
        .unwrap();

        CardCommandRepositoryTrait::create(
            store,
            &CardModel {
                id: Uuid::new_v4(),
                user_id: user.id,
                card_number: "4000000000000001".into(),
                expiration_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                status: CardStatus::Active,
                balance: dec!(100.00),
                created_at: None,
                updated_at: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn uncommitted_writes_are_invisible_and_discarded_on_drop() {
        let store = MemoryStore::new();
        let card = seed(&store).await;

        {
            let mut tx = store.begin().await.unwrap();
            let mut locked = tx.find_by_id_for_update(card.id).await.unwrap().unwrap();
            locked.balance = dec!(1.00);
            tx.save(&locked).await.unwrap();

            let outside = CardQueryRepositoryTrait::find_by_id(&store, card.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(outside.balance, dec!(100.00));
        }

        let after = CardQueryRepositoryTrait::find_by_id(&store, card.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.balance, dec!(100.00));
    }

    #[tokio::test]
    async fn commit_publishes_buffered_writes() {
        let store = MemoryStore::new();
        let card = seed(&store).await;

        let mut tx = store.begin().await.unwrap();
        let mut locked = tx.find_by_id_for_update(card.id).await.unwrap().unwrap();
        locked.status = CardStatus::Blocked;
        tx.save(&locked).await.unwrap();
        tx.commit().await.unwrap();

        let after = CardQueryRepositoryTrait::find_by_id(&store, card.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.status, CardStatus::Blocked);
    }

    #[tokio::test]
    async fn row_lock_is_held_until_the_transaction_ends() {
        let store = MemoryStore::new();
        let card = seed(&store).await;

        let mut first = store.begin().await.unwrap();
        first.find_by_id_for_update(card.id).await.unwrap();

        let contender = {
            let store = store.clone();
            tokio::spawn(async move {
                let mut second = store.begin().await.unwrap();
                second.find_by_id_for_update(card.id).await.unwrap()
            })
        };

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(first);
        assert!(contender.await.unwrap().is_some());
    }

    fn row_lock_count(store: &MemoryStore) -> usize {
        store.row_locks.lock().unwrap().len()
    }

    #[tokio::test]
    async fn row_locks_are_forgotten_once_released() {
        let store = MemoryStore::new();
        let card = seed(&store).await;

        let mut tx = store.begin().await.unwrap();
        let locked = tx.find_by_id_for_update(card.id).await.unwrap().unwrap();
        tx.save(&locked).await.unwrap();
        assert_eq!(row_lock_count(&store), 1);
        tx.commit().await.unwrap();
        assert_eq!(row_lock_count(&store), 0);

        let mut tx = store.begin().await.unwrap();
        tx.find_by_id_for_update(card.id).await.unwrap();
        drop(tx);
        assert_eq!(row_lock_count(&store), 0);

        CardCommandRepositoryTrait::delete(&store, card.id).await.unwrap();
        assert_eq!(row_lock_count(&store), 0);
    }

    #[tokio::test]
    async fn waiting_transaction_keeps_the_row_lock_alive() {
        let store = MemoryStore::new();
        let card = seed(&store).await;

        let mut first = store.begin().await.unwrap();
        first.find_by_id_for_update(card.id).await.unwrap();

        let contender = {
            let store = store.clone();
            tokio::spawn(async move {
                let mut second = store.begin().await.unwrap();
                second.find_by_id_for_update(card.id).await.unwrap();
                second
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        drop(first);
        let second = contender.await.unwrap();
        assert_eq!(row_lock_count(&store), 1);

        drop(second);
        assert_eq!(row_lock_count(&store), 0);
    }

    #[tokio::test]
    async fn second_active_request_for_a_card_is_rejected() {
        let store = MemoryStore::new();
        let card = seed(&store).await;

        let request = |id| BlockRequestModel {
            id,
            card_id: card.id,
            user_id: card.user_id,
            requested_at: Utc::now().naive_utc(),
            status: BlockRequestStatus::Active,
        };

        let mut tx = store.begin().await.unwrap();
        tx.insert_block_request(&request(Uuid::new_v4())).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let err = tx
            .insert_block_request(&request(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn injected_conflicts_fail_commits() {
        let store = MemoryStore::new();
        seed(&store).await;
        store.fail_next_commits(1);

        let tx = store.begin().await.unwrap();
        assert!(tx.commit().await.unwrap_err().is_conflict());

        let tx = store.begin().await.unwrap();
        assert!(tx.commit().await.is_ok());
    }
}
