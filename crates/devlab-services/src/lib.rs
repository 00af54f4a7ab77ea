// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# DEVLAB Service Layer

The stable application boundary for DEVLAB - defines transport-agnostic
service interfaces that can be used by any adapter (REST API, CLI, tests).

## Architecture

```text
┌─────────────────────────────────────────────────────────────────┐
│                    TRANSPORT ADAPTERS                            │
│  Axum/REST, CLI tools, integration tests                         │
└────────────────────────────┬────────────────────────────────────┘
                             ↓
┌─────────────────────────────────────────────────────────────────┐
│              SERVICE LAYER (This Crate)                          │
│  • DeviceService      - Device catalog CRUD + filtering          │
│  • DatasetService     - Probability dataset store                │
│  • AccountService     - User records                             │
│  • ProfileService     - Per-user LLM API configuration           │
│  • SystemService      - Health / counters                        │
│  • assessment         - Pure engineering calculators             │
│  • comparison         - Device comparison filter                 │
└────────────────────────────┬────────────────────────────────────┘
                             ↓
┌─────────────────────────────────────────────────────────────────┐
│                   STORAGE LAYER                                  │
│  rusqlite (SQLite), JSON columns persisted verbatim              │
└─────────────────────────────────────────────────────────────────┘
```

## Design Principles

1. **Transport-Agnostic**: Services know nothing about HTTP
2. **Stable Contracts**: Trait interfaces don't change when storage changes
3. **Async by Default**: All services are async
4. **Error Translation**: Storage errors are translated to transport-agnostic `ServiceError`
5. **DTO-Based**: All parameters and returns use transport-agnostic DTOs
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod assessment;
pub mod comparison;
pub mod impls;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use impls::{
    AccountServiceImpl, DatasetServiceImpl, DeviceServiceImpl, ProfileServiceImpl,
    SystemServiceImpl,
};
pub use storage::Store;
pub use traits::{AccountService, DatasetService, DeviceService, ProfileService, SystemService};
pub use types::errors::{ServiceError, ServiceResult};
pub use types::dtos::*;
