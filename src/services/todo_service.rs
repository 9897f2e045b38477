// src/services/todo_service.rs

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        listing::{ListPage, ListQuery},
        validation::trimmed,
    },
    db::Repository,
    models::{
        record::Record,
        todo::{Todo, TodoPayload},
    },
    services::crm_service::list_view,
};

const DEFAULT_CATEGORY: &str = "personal";

// Lista pessoal: todas as operações recebem o dono e nunca enxergam tarefas de outro usuário
#[derive(Clone)]
pub struct TodoService {
    todos: Repository<Todo>,
}

impl TodoService {
    pub fn new(todos: Repository<Todo>) -> Self {
        Self { todos }
    }

    pub async fn create(&self, owner_id: Uuid, payload: TodoPayload) -> Result<Record<Todo>, AppError> {
        payload.validate()?;

        let todo = Todo {
            owner_id,
            text: payload.text.trim().to_string(),
            completed: false,
            category: trimmed(payload.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            priority: payload.priority,
            due_date: payload.due_date,
        };

        self.todos.insert(&todo).await
    }

    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Record<Todo>>, AppError> {
        Ok(self
            .todos
            .list()
            .await?
            .into_iter()
            .filter(|t| t.data.owner_id == owner_id)
            .collect())
    }

    pub async fn view(&self, owner_id: Uuid, query: &ListQuery) -> Result<ListPage, AppError> {
        list_view(&self.list(owner_id).await?, query)
    }

    // Tarefa de outro dono responde como inexistente
    async fn owned(&self, owner_id: Uuid, id: Uuid) -> Result<Record<Todo>, AppError> {
        self.todos
            .find_by_id(id)
            .await?
            .filter(|t| t.data.owner_id == owner_id)
            .ok_or(AppError::NotFound("todo"))
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        payload: TodoPayload,
    ) -> Result<Record<Todo>, AppError> {
        payload.validate()?;
        let current = self.owned(owner_id, id).await?;

        let todo = Todo {
            owner_id,
            text: payload.text.trim().to_string(),
            completed: current.data.completed,
            category: trimmed(payload.category).unwrap_or(current.data.category),
            priority: payload.priority,
            due_date: payload.due_date,
        };

        self.todos
            .replace(id, &todo)
            .await?
            .ok_or(AppError::NotFound("todo"))
    }

    pub async fn toggle(&self, owner_id: Uuid, id: Uuid) -> Result<Record<Todo>, AppError> {
        let mut todo = self.owned(owner_id, id).await?.data;
        todo.completed = !todo.completed;

        self.todos
            .replace(id, &todo)
            .await?
            .ok_or(AppError::NotFound("todo"))
    }

    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.owned(owner_id, id).await?;
        if !self.todos.delete(id).await? {
            return Err(AppError::NotFound("todo"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{db::MemoryStore, models::todo::TodoPriority};

    fn payload(text: &str) -> TodoPayload {
        TodoPayload {
            text: text.to_string(),
            category: None,
            priority: TodoPriority::High,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn todos_are_private_to_their_owner() {
        let svc = TodoService::new(Repository::new(Arc::new(MemoryStore::new())));
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let todo = svc.create(alice, payload("Ligar para a Acme")).await.unwrap();
        assert_eq!(todo.data.category, "personal");
        assert!(svc.list(bob).await.unwrap().is_empty());

        let err = svc.toggle(bob, todo.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let toggled = svc.toggle(alice, todo.id).await.unwrap();
        assert!(toggled.data.completed);

        svc.delete(alice, todo.id).await.unwrap();
        assert!(svc.list(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let svc = TodoService::new(Repository::new(Arc::new(MemoryStore::new())));
        let err = svc.create(Uuid::new_v4(), payload("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
