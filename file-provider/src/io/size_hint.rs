/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// The bounds on a stream's remaining length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeHint {
    lower: u64,
    upper: Option<u64>,
}

impl SizeHint {
    /// Set an exact size hint with upper and lower set to `size` bytes.
    pub fn exact(size: u64) -> Self {
        Self {
            lower: size,
            upper: Some(size),
        }
    }

    /// Set the lower bound of the size hint
    pub fn with_lower(mut self, lower: u64) -> Self {
        self.lower = lower;
        self
    }

    /// Set the upper bound of the size hint
    pub fn with_upper(mut self, upper: Option<u64>) -> Self {
        self.upper = upper;
        self
    }

    /// Get the lower bound of the size hint
    pub fn lower(&self) -> u64 {
        self.lower
    }

    /// Get the upper bound of the size hint
    pub fn upper(&self) -> Option<u64> {
        self.upper
    }
}
