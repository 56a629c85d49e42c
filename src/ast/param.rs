/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:     param.rs
 * Purpose:  Defines the AST structure for function parameters and
 *           structure fields.
 *
 * This file defines the `Param` struct used by:
 *  - Function definitions (`define function $f with $a , $b as ...`)
 *  - Structure definitions (`define structure $Point with $x , $y .`)
 *
 * License:
 * This file is part of the Carmen programming language project.
 *
 * Carmen is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use serde::{Deserialize, Serialize};

use crate::span::Position;

/// Represents **one declared name** in a parameter or field list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Identifier including its sigil: `$amount`
    pub name: String,

    /// Where the name was written.
    pub position: Position,
}
