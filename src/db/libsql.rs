use crate::types::{AppError, Client, Order, OrderItem, OrderStatus, Product, Result, User};
use libsql::{Builder, Connection, Database, Row};

/// libsql-backed document store.
///
/// Records are plain rows; order items are kept as a JSON document column.
/// There are intentionally no foreign keys: referential existence is
/// checked at the application layer, matching the document-store model.
pub struct LibsqlStore {
    db: Database,
}

impl LibsqlStore {
    /// In-memory store, used for development and tests.
    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    /// File-based local store.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open local store: {}", e)))?;

        let store = Self { db };
        store.initialize_schema().await?;

        Ok(store)
    }

    /// Remote Turso replica.
    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;

        let store = Self { db };
        store.initialize_schema().await?;

        Ok(store)
    }

    fn connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS clients (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create clients table: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                price REAL NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create products table: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS orders (
                id TEXT PRIMARY KEY,
                client_id TEXT NOT NULL,
                items TEXT NOT NULL,
                total_price REAL NOT NULL,
                status TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create orders table: {}", e)))?;

        Ok(())
    }
}

fn client_from_row(row: &Row) -> Result<Client> {
    Ok(Client {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        email: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
    })
}

fn order_from_row(row: &Row) -> Result<Order> {
    let items_json: String = row.get(2).map_err(|e| AppError::Database(e.to_string()))?;
    let items: Vec<OrderItem> = serde_json::from_str(&items_json)
        .map_err(|e| AppError::Database(format!("Corrupt order items document: {}", e)))?;
    let status_str: String = row.get(4).map_err(|e| AppError::Database(e.to_string()))?;
    let created_ts: i64 = row.get(5).map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Order {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        client_id: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        items,
        total_price: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        status: OrderStatus::parse(&status_str).unwrap_or(OrderStatus::Pending),
        created_at: chrono::DateTime::from_timestamp(created_ts, 0).unwrap_or_default(),
    })
}

#[async_trait::async_trait]
impl super::traits::DocumentStore for LibsqlStore {
    // ============== User Operations ==============

    async fn create_user(&self, user: &User) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO users (id, email, password_hash, name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                user.id.as_str(),
                user.email.as_str(),
                user.password_hash.as_str(),
                user.name.as_str(),
                user.created_at,
            ),
        )
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") {
                AppError::InvalidInput("A user with this email already exists".to_string())
            } else {
                AppError::Database(format!("Failed to create user: {}", msg))
            }
        })?;

        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, email, password_hash, name, created_at
                 FROM users WHERE email = ?1",
                [email],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(User {
                id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
                email: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
                password_hash: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
                name: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
                created_at: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
            }))
        } else {
            Ok(None)
        }
    }

    // ============== Client Operations ==============

    async fn create_client(&self, client: &Client) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO clients (id, name, email) VALUES (?1, ?2, ?3)",
            (
                client.id.as_str(),
                client.name.as_str(),
                client.email.as_str(),
            ),
        )
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") {
                AppError::Conflict("A client with this email already exists".to_string())
            } else {
                AppError::Database(format!("Failed to create client: {}", msg))
            }
        })?;

        Ok(())
    }

    async fn get_client(&self, id: &str) -> Result<Option<Client>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query("SELECT id, name, email FROM clients WHERE id = ?1", [id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query client: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(client_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_clients(
        &self,
        page: u32,
        limit: u32,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<(Vec<Client>, u64)> {
        let conn = self.connection()?;

        let name_filter = name.unwrap_or("").to_string();
        let email_filter = email.unwrap_or("").to_string();
        let limit = i64::from(limit.max(1));
        let offset = i64::from(page.max(1) - 1) * limit;

        let mut count_rows = conn
            .query(
                "SELECT COUNT(*) FROM clients
                 WHERE (?1 = '' OR instr(lower(name), lower(?1)) > 0)
                   AND (?2 = '' OR instr(lower(email), lower(?2)) > 0)",
                (name_filter.clone(), email_filter.clone()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to count clients: {}", e)))?;

        let total = match count_rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => row
                .get::<i64>(0)
                .map_err(|e| AppError::Database(e.to_string()))? as u64,
            None => 0,
        };

        let mut rows = conn
            .query(
                "SELECT id, name, email FROM clients
                 WHERE (?1 = '' OR instr(lower(name), lower(?1)) > 0)
                   AND (?2 = '' OR instr(lower(email), lower(?2)) > 0)
                 ORDER BY rowid LIMIT ?3 OFFSET ?4",
                (name_filter, email_filter, limit, offset),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query clients: {}", e)))?;

        let mut clients = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            clients.push(client_from_row(&row)?);
        }

        Ok((clients, total))
    }

    async fn update_client(
        &self,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<Client>> {
        let Some(mut client) = self.get_client(id).await? else {
            return Ok(None);
        };

        if let Some(name) = name {
            client.name = name.to_string();
        }
        if let Some(email) = email {
            client.email = email.to_string();
        }

        let conn = self.connection()?;
        conn.execute(
            "UPDATE clients SET name = ?1, email = ?2 WHERE id = ?3",
            (client.name.as_str(), client.email.as_str(), id),
        )
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") {
                AppError::Conflict("A client with this email already exists".to_string())
            } else {
                AppError::Database(format!("Failed to update client: {}", msg))
            }
        })?;

        Ok(Some(client))
    }

    async fn delete_client(&self, id: &str) -> Result<bool> {
        let conn = self.connection()?;

        let affected = conn
            .execute("DELETE FROM clients WHERE id = ?1", [id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete client: {}", e)))?;

        Ok(affected > 0)
    }

    // ============== Product Operations ==============

    async fn create_product(&self, product: &Product) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO products (id, name, price) VALUES (?1, ?2, ?3)",
            (
                product.id.as_str(),
                product.name.as_str(),
                product.price,
            ),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create product: {}", e)))?;

        Ok(())
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query("SELECT id, name, price FROM products WHERE id = ?1", [id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query product: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(Product {
                id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
                name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
                price: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
            }))
        } else {
            Ok(None)
        }
    }

    // ============== Order Operations ==============

    async fn create_order(&self, order: &Order) -> Result<()> {
        let conn = self.connection()?;

        let items = serde_json::to_string(&order.items)
            .map_err(|e| AppError::Internal(format!("Failed to encode order items: {}", e)))?;

        conn.execute(
            "INSERT INTO orders (id, client_id, items, total_price, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                order.id.as_str(),
                order.client_id.as_str(),
                items,
                order.total_price,
                order.status.as_str(),
                order.created_at.timestamp(),
            ),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create order: {}", e)))?;

        Ok(())
    }

    async fn get_order(&self, id: &str) -> Result<Option<Order>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, client_id, items, total_price, status, created_at
                 FROM orders WHERE id = ?1",
                [id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query order: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(order_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_orders(
        &self,
        page: u32,
        limit: u32,
        status: Option<OrderStatus>,
        client_id: Option<&str>,
    ) -> Result<(Vec<Order>, u64)> {
        let conn = self.connection()?;

        let status_filter = status.map(|s| s.as_str()).unwrap_or("").to_string();
        let client_filter = client_id.unwrap_or("").to_string();
        let limit = i64::from(limit.max(1));
        let offset = i64::from(page.max(1) - 1) * limit;

        let mut count_rows = conn
            .query(
                "SELECT COUNT(*) FROM orders
                 WHERE (?1 = '' OR status = ?1)
                   AND (?2 = '' OR client_id = ?2)",
                (status_filter.clone(), client_filter.clone()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to count orders: {}", e)))?;

        let total = match count_rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => row
                .get::<i64>(0)
                .map_err(|e| AppError::Database(e.to_string()))? as u64,
            None => 0,
        };

        let mut rows = conn
            .query(
                "SELECT id, client_id, items, total_price, status, created_at
                 FROM orders
                 WHERE (?1 = '' OR status = ?1)
                   AND (?2 = '' OR client_id = ?2)
                 ORDER BY rowid LIMIT ?3 OFFSET ?4",
                (status_filter, client_filter, limit, offset),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query orders: {}", e)))?;

        let mut orders = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            orders.push(order_from_row(&row)?);
        }

        Ok((orders, total))
    }

    async fn update_order_items(
        &self,
        id: &str,
        items: &[OrderItem],
        total_price: f64,
    ) -> Result<Option<Order>> {
        let conn = self.connection()?;

        let items_json = serde_json::to_string(items)
            .map_err(|e| AppError::Internal(format!("Failed to encode order items: {}", e)))?;

        let affected = conn
            .execute(
                "UPDATE orders SET items = ?1, total_price = ?2 WHERE id = ?3",
                (items_json, total_price, id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update order: {}", e)))?;

        if affected == 0 {
            return Ok(None);
        }

        self.get_order(id).await
    }

    async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<Option<Order>> {
        let conn = self.connection()?;

        let affected = conn
            .execute(
                "UPDATE orders SET status = ?1 WHERE id = ?2",
                (status.as_str(), id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update order status: {}", e)))?;

        if affected == 0 {
            return Ok(None);
        }

        self.get_order(id).await
    }

    async fn delete_order(&self, id: &str) -> Result<bool> {
        let conn = self.connection()?;

        let affected = conn
            .execute("DELETE FROM orders WHERE id = ?1", [id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete order: {}", e)))?;

        Ok(affected > 0)
    }
}
