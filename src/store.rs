// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::models::{
    Account, AccountKind, CREDIT_SCORE_MAX, CREDIT_SCORE_MIN, CreditScoreEntry, Goal, GoalKind,
    Loan, LoanKind, Transaction, TxKind, User,
};
use crate::session::Session;

#[derive(Clone)]
pub struct NewAccount {
    pub name: String,
    pub kind: AccountKind,
    pub institution: Option<String>,
    pub balance: Decimal,
    pub is_manual: bool,
}

#[derive(Clone)]
pub struct NewTransaction {
    pub kind: TxKind,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub account_id: Option<i64>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct NewLoan {
    pub name: String,
    pub kind: LoanKind,
    pub principal: Decimal,
    pub current_balance: Decimal,
    pub interest_rate: Decimal,
    pub monthly_payment: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Clone)]
pub struct NewGoal {
    pub name: String,
    pub kind: GoalKind,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
}

#[derive(Default)]
pub struct TxFilter {
    pub month: Option<String>,
    pub kind: Option<TxKind>,
    pub category: Option<String>,
    pub account_id: Option<i64>,
    pub limit: Option<usize>,
}

fn parse_money(raw: &str, what: &str, id: i64) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' on row {}", what, raw, id))
}

fn require_nonempty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{} must not be empty", what);
    }
    Ok(())
}

// ---- users ----

pub fn create_user(conn: &Connection, email: &str, name: &str) -> Result<User> {
    let email = email.trim();
    let name = name.trim();
    require_nonempty(email, "Email")?;
    require_nonempty(name, "Name")?;
    conn.execute(
        "INSERT INTO users(email, name) VALUES (?1, ?2)",
        params![email, name],
    )
    .with_context(|| format!("Could not add user '{}' (email already taken?)", email))?;
    Ok(User {
        id: conn.last_insert_rowid(),
        email: email.to_string(),
        name: name.to_string(),
    })
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, email, name FROM users ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok(User {
            id: r.get(0)?,
            email: r.get(1)?,
            name: r.get(2)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

// ---- accounts ----

pub fn insert_account(conn: &Connection, session: &Session, new: &NewAccount) -> Result<i64> {
    require_nonempty(&new.name, "Account name")?;
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, institution, balance, is_manual)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            session.user_id,
            new.name.trim(),
            new.kind.as_str(),
            new.institution,
            new.balance.to_string(),
            new.is_manual,
        ],
    )
    .with_context(|| format!("Could not add account '{}' (name already used?)", new.name))?;
    Ok(conn.last_insert_rowid())
}

pub fn list_accounts(conn: &Connection, session: &Session) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, institution, balance, is_manual
         FROM accounts WHERE user_id=?1 ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![session.user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, bool>(5)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, kind, institution, balance, is_manual) = row?;
        out.push(Account {
            id,
            name,
            kind: kind
                .parse()
                .with_context(|| format!("Corrupt account type on row {}", id))?,
            institution,
            balance: parse_money(&balance, "balance", id)?,
            is_manual,
        });
    }
    Ok(out)
}

pub fn account_id_by_name(conn: &Connection, session: &Session, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM accounts WHERE user_id=?1 AND name=?2")?;
    let id: i64 = stmt
        .query_row(params![session.user_id, name], |r| r.get(0))
        .with_context(|| format!("Account '{}' not found", name))?;
    Ok(id)
}

pub fn update_account_balance(
    conn: &Connection,
    session: &Session,
    account_id: i64,
    balance: Decimal,
) -> Result<bool> {
    let n = conn.execute(
        "UPDATE accounts SET balance=?1 WHERE id=?2 AND user_id=?3",
        params![balance.to_string(), account_id, session.user_id],
    )?;
    Ok(n > 0)
}

pub fn delete_account(conn: &Connection, session: &Session, account_id: i64) -> Result<bool> {
    // No cascade: the account's transactions stay behind on purpose.
    let n = conn.execute(
        "DELETE FROM accounts WHERE id=?1 AND user_id=?2",
        params![account_id, session.user_id],
    )?;
    Ok(n > 0)
}

// ---- transactions ----

pub fn insert_transaction(
    conn: &Connection,
    session: &Session,
    new: &NewTransaction,
) -> Result<i64> {
    require_nonempty(&new.category, "Category")?;
    if new.amount <= Decimal::ZERO {
        bail!("Amount must be positive; the sign is implied by the transaction type");
    }
    conn.execute(
        "INSERT INTO transactions(user_id, type, category, amount, date, account_id, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            session.user_id,
            new.kind.as_str(),
            new.category.trim(),
            new.amount.to_string(),
            new.date,
            new.account_id,
            new.description,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_transactions(
    conn: &Connection,
    session: &Session,
    filter: &TxFilter,
) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, type, category, amount, date, account_id, description
         FROM transactions WHERE user_id=?",
    );
    let mut binds: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(session.user_id)];

    if let Some(ref month) = filter.month {
        sql.push_str(" AND substr(date,1,7)=?");
        binds.push(Box::new(month.clone()));
    }
    if let Some(kind) = filter.kind {
        sql.push_str(" AND type=?");
        binds.push(Box::new(kind.as_str()));
    }
    if let Some(ref category) = filter.category {
        sql.push_str(" AND category=?");
        binds.push(Box::new(category.clone()));
    }
    if let Some(account_id) = filter.account_id {
        sql.push_str(" AND account_id=?");
        binds.push(Box::new(account_id));
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        binds.push(Box::new(limit as i64));
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = binds.iter().map(|b| b.as_ref()).collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let kind: String = r.get(1)?;
        let category: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let date: NaiveDate = r.get(4)?;
        let account_id: Option<i64> = r.get(5)?;
        let description: Option<String> = r.get(6)?;
        out.push(Transaction {
            id,
            kind: kind
                .parse()
                .with_context(|| format!("Corrupt transaction type on row {}", id))?,
            category,
            amount: parse_money(&amount, "amount", id)?,
            date,
            account_id,
            description,
        });
    }
    Ok(out)
}

pub fn delete_transaction(conn: &Connection, session: &Session, tx_id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![tx_id, session.user_id],
    )?;
    Ok(n > 0)
}

// ---- loans ----

pub fn insert_loan(conn: &Connection, session: &Session, new: &NewLoan) -> Result<i64> {
    require_nonempty(&new.name, "Loan name")?;
    // Zero principal would make repayment progress undefined.
    if new.principal <= Decimal::ZERO {
        bail!("Loan principal must be positive");
    }
    if new.end_date < new.start_date {
        bail!("Loan end date is before its start date");
    }
    conn.execute(
        "INSERT INTO loans(user_id, name, type, principal, current_balance, interest_rate,
                           monthly_payment, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            session.user_id,
            new.name.trim(),
            new.kind.as_str(),
            new.principal.to_string(),
            new.current_balance.to_string(),
            new.interest_rate.to_string(),
            new.monthly_payment.to_string(),
            new.start_date,
            new.end_date,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_loans(conn: &Connection, session: &Session) -> Result<Vec<Loan>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, principal, current_balance, interest_rate,
                monthly_payment, start_date, end_date
         FROM loans WHERE user_id=?1 ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![session.user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, NaiveDate>(7)?,
            r.get::<_, NaiveDate>(8)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, kind, principal, balance, rate, payment, start_date, end_date) = row?;
        out.push(Loan {
            id,
            name,
            kind: kind
                .parse()
                .with_context(|| format!("Corrupt loan type on row {}", id))?,
            principal: parse_money(&principal, "principal", id)?,
            current_balance: parse_money(&balance, "current balance", id)?,
            interest_rate: parse_money(&rate, "interest rate", id)?,
            monthly_payment: parse_money(&payment, "monthly payment", id)?,
            start_date,
            end_date,
        });
    }
    Ok(out)
}

pub fn update_loan_balance(
    conn: &Connection,
    session: &Session,
    loan_id: i64,
    balance: Decimal,
) -> Result<bool> {
    let n = conn.execute(
        "UPDATE loans SET current_balance=?1 WHERE id=?2 AND user_id=?3",
        params![balance.to_string(), loan_id, session.user_id],
    )?;
    Ok(n > 0)
}

pub fn delete_loan(conn: &Connection, session: &Session, loan_id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM loans WHERE id=?1 AND user_id=?2",
        params![loan_id, session.user_id],
    )?;
    Ok(n > 0)
}

// ---- goals ----

pub fn insert_goal(conn: &Connection, session: &Session, new: &NewGoal) -> Result<i64> {
    require_nonempty(&new.name, "Goal name")?;
    // Zero target would make progress undefined.
    if new.target_amount <= Decimal::ZERO {
        bail!("Goal target amount must be positive");
    }
    if new.current_amount < Decimal::ZERO {
        bail!("Goal current amount must not be negative");
    }
    conn.execute(
        "INSERT INTO goals(user_id, name, type, target_amount, current_amount, target_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            session.user_id,
            new.name.trim(),
            new.kind.as_str(),
            new.target_amount.to_string(),
            new.current_amount.to_string(),
            new.target_date,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_goals(conn: &Connection, session: &Session) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, target_amount, current_amount, target_date
         FROM goals WHERE user_id=?1 ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![session.user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, Option<NaiveDate>>(5)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, kind, target, current, target_date) = row?;
        out.push(Goal {
            id,
            name,
            kind: kind
                .parse()
                .with_context(|| format!("Corrupt goal type on row {}", id))?,
            target_amount: parse_money(&target, "target amount", id)?,
            current_amount: parse_money(&current, "current amount", id)?,
            target_date,
        });
    }
    Ok(out)
}

pub fn update_goal_current(
    conn: &Connection,
    session: &Session,
    goal_id: i64,
    amount: Decimal,
) -> Result<bool> {
    if amount < Decimal::ZERO {
        bail!("Goal current amount must not be negative");
    }
    let n = conn.execute(
        "UPDATE goals SET current_amount=?1 WHERE id=?2 AND user_id=?3",
        params![amount.to_string(), goal_id, session.user_id],
    )?;
    Ok(n > 0)
}

pub fn delete_goal(conn: &Connection, session: &Session, goal_id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM goals WHERE id=?1 AND user_id=?2",
        params![goal_id, session.user_id],
    )?;
    Ok(n > 0)
}

// ---- credit scores ----

pub fn insert_credit_score(
    conn: &Connection,
    session: &Session,
    score: i64,
    date: NaiveDate,
    provider: &str,
) -> Result<i64> {
    require_nonempty(provider, "Provider")?;
    if !(CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&score) {
        bail!(
            "Credit score {} out of range ({}..={})",
            score,
            CREDIT_SCORE_MIN,
            CREDIT_SCORE_MAX
        );
    }
    conn.execute(
        "INSERT INTO credit_scores(user_id, score, date, provider) VALUES (?1, ?2, ?3, ?4)",
        params![session.user_id, score, date, provider.trim()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_credit_scores(conn: &Connection, session: &Session) -> Result<Vec<CreditScoreEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, score, date, provider
         FROM credit_scores WHERE user_id=?1 ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![session.user_id], |r| {
        Ok(CreditScoreEntry {
            id: r.get(0)?,
            score: r.get(1)?,
            date: r.get(2)?,
            provider: r.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn delete_credit_score(conn: &Connection, session: &Session, entry_id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM credit_scores WHERE id=?1 AND user_id=?2",
        params![entry_id, session.user_id],
    )?;
    Ok(n > 0)
}
