//! Student and enrollment persistence against SQLite.

use crate::error::AppError;
use crate::model::{Enrollment, NewEnrollment, NewStudent, Student, StudentDetail, StudentPatch};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const STUDENT_COLUMNS: &str = "id, name, email, birth_date";
const ENROLLMENT_COLUMNS: &str = "id, subject, year, term, approved, student_id";

pub struct StudentService;

impl StudentService {
    /// All students, id ascending.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT {} FROM students ORDER BY id", STUDENT_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn read(pool: &SqlitePool, id: i64) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM students WHERE id = ?", STUDENT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Student plus its enrollments, or None when the student does not exist.
    pub async fn read_with_enrollments(pool: &SqlitePool, id: i64) -> Result<Option<StudentDetail>, AppError> {
        let Some(student) = Self::read(pool, id).await? else {
            return Ok(None);
        };
        let enrollments = EnrollmentService::list_for_student(pool, id).await?;
        Ok(Some(StudentDetail { student, enrollments }))
    }

    /// Insert one student. Returns the new id.
    pub async fn create(pool: &SqlitePool, student: &NewStudent) -> Result<i64, AppError> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut conn, student).await
    }

    /// Insert all students in one transaction. Returns ids in input order.
    pub async fn bulk_create(pool: &SqlitePool, students: &[NewStudent]) -> Result<Vec<i64>, AppError> {
        let mut out = Vec::with_capacity(students.len());
        let mut tx = pool.begin().await?;
        for student in students {
            out.push(Self::insert(&mut tx, student).await?);
        }
        tx.commit().await?;
        Ok(out)
    }

    /// Apply the present fields. Returns the number of matched rows.
    pub async fn update(pool: &SqlitePool, id: i64, patch: &StudentPatch) -> Result<u64, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE students SET updated_at = ");
        qb.push_bind(Utc::now());
        if let Some(name) = &patch.name {
            qb.push(", name = ").push_bind(name.clone());
        }
        if let Some(email) = &patch.email {
            qb.push(", email = ").push_bind(email.clone());
        }
        if let Some(birth_date) = patch.birth_date {
            qb.push(", birth_date = ").push_bind(birth_date);
        }
        qb.push(" WHERE id = ").push_bind(id);
        tracing::debug!(sql = %qb.sql(), id, "query");
        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete by id. Enrollments that reference the student are left in place.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, AppError> {
        let sql = "DELETE FROM students WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, AppError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students").fetch_one(pool).await?;
        Ok(n)
    }

    async fn insert(conn: &mut SqliteConnection, student: &NewStudent) -> Result<i64, AppError> {
        let sql = "INSERT INTO students (name, email, birth_date, created_at, updated_at) VALUES (?, ?, ?, ?, ?)";
        tracing::debug!(sql = %sql, name = %student.name, "query");
        let now = Utc::now();
        let result = sqlx::query(sql)
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.birth_date)
            .bind(now)
            .bind(now)
            .execute(&mut *conn)
            .await?;
        Ok(result.last_insert_rowid())
    }
}

pub struct EnrollmentService;

impl EnrollmentService {
    pub async fn list_for_student(pool: &SqlitePool, student_id: i64) -> Result<Vec<Enrollment>, AppError> {
        let sql = format!(
            "SELECT {} FROM enrollments WHERE student_id = ? ORDER BY id",
            ENROLLMENT_COLUMNS
        );
        tracing::debug!(sql = %sql, student_id, "query");
        let rows = sqlx::query_as::<_, Enrollment>(&sql)
            .bind(student_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn read(pool: &SqlitePool, id: i64) -> Result<Option<Enrollment>, AppError> {
        let sql = format!("SELECT {} FROM enrollments WHERE id = ?", ENROLLMENT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Enrollment>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Insert one enrollment. The referenced student is not checked. Returns the new id.
    pub async fn create(pool: &SqlitePool, enrollment: &NewEnrollment) -> Result<i64, AppError> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut conn, enrollment).await
    }

    pub async fn bulk_create(pool: &SqlitePool, enrollments: &[NewEnrollment]) -> Result<Vec<i64>, AppError> {
        let mut out = Vec::with_capacity(enrollments.len());
        let mut tx = pool.begin().await?;
        for enrollment in enrollments {
            out.push(Self::insert(&mut tx, enrollment).await?);
        }
        tx.commit().await?;
        Ok(out)
    }

    /// Set the approval flag. Returns the number of matched rows; repeating is harmless.
    pub async fn set_approved(pool: &SqlitePool, id: i64, approved: bool) -> Result<u64, AppError> {
        let sql = "UPDATE enrollments SET approved = ?, updated_at = ? WHERE id = ?";
        tracing::debug!(sql = %sql, id, approved, "query");
        let result = sqlx::query(sql)
            .bind(approved)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, AppError> {
        let sql = "DELETE FROM enrollments WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, AppError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM enrollments").fetch_one(pool).await?;
        Ok(n)
    }

    async fn insert(conn: &mut SqliteConnection, enrollment: &NewEnrollment) -> Result<i64, AppError> {
        let sql = "INSERT INTO enrollments (subject, year, term, approved, student_id, created_at, updated_at) \
                   VALUES (?, ?, ?, ?, ?, ?, ?)";
        tracing::debug!(sql = %sql, student_id = enrollment.student_id, "query");
        let now = Utc::now();
        let result = sqlx::query(sql)
            .bind(&enrollment.subject)
            .bind(enrollment.year)
            .bind(enrollment.term)
            .bind(enrollment.approved)
            .bind(enrollment.student_id)
            .bind(now)
            .bind(now)
            .execute(&mut *conn)
            .await?;
        Ok(result.last_insert_rowid())
    }
}
