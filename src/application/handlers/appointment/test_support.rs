//! Shared in-memory port implementations for appointment handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::cashflow::{Expense, Income};
use crate::domain::clinic::{Appointment, Dentist, Patient, Procedure};
use crate::domain::foundation::{
    AppointmentId, DentistId, DomainError, EntryId, ErrorCode, Money, OwnerId, PatientId,
    Percentage, ProcedureId, Timestamp,
};
use crate::ports::{
    AppointmentRepository, DentistRepository, LedgerRepository, PatientRepository,
    ProcedureRepository,
};

pub fn patient(owner: &OwnerId) -> Patient {
    Patient::new(
        *owner,
        "Maria Souza".to_string(),
        "52998224725",
        Timestamp::now(),
    )
    .unwrap()
}

pub fn dentist_with_commission(owner: &OwnerId, rate: &str) -> Dentist {
    Dentist::new(
        *owner,
        "Dr. Silva".to_string(),
        "CRO-SP-12345",
        Some(Percentage::try_new(rate.parse().unwrap()).unwrap()),
        Timestamp::now(),
    )
    .unwrap()
}

pub fn procedure_with_price(owner: &OwnerId, price: &str) -> Procedure {
    Procedure::new(
        *owner,
        "Cleaning".to_string(),
        Money::try_new(price.parse().unwrap()).unwrap(),
        Timestamp::now(),
    )
    .unwrap()
}

/// Appointment store backed by a mutex-guarded map, with real version
/// checking so conflict paths are exercised.
#[derive(Default)]
pub struct InMemoryAppointments {
    rows: Mutex<HashMap<AppointmentId, Appointment>>,
}

impl InMemoryAppointments {
    pub fn with(appointment: Appointment) -> Self {
        let store = Self::default();
        store
            .rows
            .lock()
            .unwrap()
            .insert(appointment.id, appointment);
        store
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, id: &AppointmentId) -> Option<Appointment> {
        self.rows.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointments {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(id)
            .filter(|a| a.owner_id == *owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Appointment>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, appointment: &Appointment) -> Result<(), DomainError> {
        self.rows
            .lock()
            .unwrap()
            .insert(appointment.id, appointment.clone());
        Ok(())
    }

    async fn update_versioned(&self, appointment: &Appointment) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let stored = rows
            .get_mut(&appointment.id)
            .ok_or_else(|| DomainError::new(ErrorCode::AppointmentNotFound, "gone"))?;
        if stored.version != appointment.version {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Appointment was modified concurrently",
            ));
        }
        let mut next = appointment.clone();
        next.version += 1;
        *stored = next;
        Ok(())
    }

    async fn delete(&self, owner_id: &OwnerId, id: &AppointmentId) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get(id) {
            Some(a) if a.owner_id == *owner_id => {
                rows.remove(id);
                Ok(())
            }
            _ => Err(DomainError::new(
                ErrorCode::AppointmentNotFound,
                "Appointment not found",
            )),
        }
    }
}

/// Fixed set of patients, owner-scoped like the real repository.
pub struct StaticPatients {
    rows: Vec<Patient>,
}

impl StaticPatients {
    pub fn of(patient: Patient) -> Self {
        Self {
            rows: vec![patient],
        }
    }

    pub fn empty() -> Self {
        Self { rows: vec![] }
    }
}

#[async_trait]
impl PatientRepository for StaticPatients {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &PatientId,
    ) -> Result<Option<Patient>, DomainError> {
        Ok(self
            .rows
            .iter()
            .find(|p| p.id == *id && p.owner_id == *owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Patient>, DomainError> {
        Ok(self
            .rows
            .iter()
            .filter(|p| p.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, _patient: &Patient) -> Result<(), DomainError> {
        Ok(())
    }

    async fn update(&self, _patient: &Patient) -> Result<(), DomainError> {
        Ok(())
    }

    async fn delete(&self, _owner_id: &OwnerId, _id: &PatientId) -> Result<(), DomainError> {
        Ok(())
    }
}

pub struct StaticDentists {
    rows: Vec<Dentist>,
}

impl StaticDentists {
    pub fn of(dentist: Dentist) -> Self {
        Self {
            rows: vec![dentist],
        }
    }

    pub fn empty() -> Self {
        Self { rows: vec![] }
    }
}

#[async_trait]
impl DentistRepository for StaticDentists {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &DentistId,
    ) -> Result<Option<Dentist>, DomainError> {
        Ok(self
            .rows
            .iter()
            .find(|d| d.id == *id && d.owner_id == *owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Dentist>, DomainError> {
        Ok(self
            .rows
            .iter()
            .filter(|d| d.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, _dentist: &Dentist) -> Result<(), DomainError> {
        Ok(())
    }

    async fn update(&self, _dentist: &Dentist) -> Result<(), DomainError> {
        Ok(())
    }
}

pub struct StaticProcedures {
    rows: Vec<Procedure>,
}

impl StaticProcedures {
    pub fn of(procedure: Procedure) -> Self {
        Self {
            rows: vec![procedure],
        }
    }
}

#[async_trait]
impl ProcedureRepository for StaticProcedures {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &ProcedureId,
    ) -> Result<Option<Procedure>, DomainError> {
        Ok(self
            .rows
            .iter()
            .find(|p| p.id == *id && p.owner_id == *owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Procedure>, DomainError> {
        Ok(self
            .rows
            .iter()
            .filter(|p| p.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, _procedure: &Procedure) -> Result<(), DomainError> {
        Ok(())
    }

    async fn update(&self, _procedure: &Procedure) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Ledger store with the partial-unique behavior of the real table: at most
/// one income entry per appointment.
#[derive(Default)]
pub struct InMemoryLedger {
    incomes: Mutex<Vec<Income>>,
}

impl InMemoryLedger {
    pub fn income_count(&self) -> usize {
        self.incomes.lock().unwrap().len()
    }

    pub fn incomes(&self) -> Vec<Income> {
        self.incomes.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedger {
    async fn create_income(&self, income: &Income) -> Result<(), DomainError> {
        let mut incomes = self.incomes.lock().unwrap();
        if let Some(appointment_id) = income.appointment_id {
            if incomes
                .iter()
                .any(|i| i.appointment_id == Some(appointment_id))
            {
                return Err(DomainError::new(
                    ErrorCode::Conflict,
                    "Income for appointment already exists",
                ));
            }
        }
        incomes.push(income.clone());
        Ok(())
    }

    async fn create_expense(&self, _expense: &Expense) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_income_by_appointment(
        &self,
        owner_id: &OwnerId,
        appointment_id: &AppointmentId,
    ) -> Result<Option<Income>, DomainError> {
        Ok(self
            .incomes
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.owner_id == *owner_id && i.appointment_id == Some(*appointment_id))
            .cloned())
    }

    async fn delete_income(&self, owner_id: &OwnerId, id: &EntryId) -> Result<(), DomainError> {
        self.incomes
            .lock()
            .unwrap()
            .retain(|i| !(i.owner_id == *owner_id && i.id == *id));
        Ok(())
    }

    async fn delete_expense(&self, _owner_id: &OwnerId, _id: &EntryId) -> Result<(), DomainError> {
        Ok(())
    }
}
