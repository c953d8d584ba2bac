// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Context association lists: a variable-length IF context subsection
naming the stream identifiers this context packet is associated with.
*/

use crate::error::VrtError;

const SOURCE_SYSTEM_MASK: usize = 0x01FF;
const VECTOR_MASK: usize = 0xFFFF;
const ASYNC_MASK: usize = 0x7FFF;

/// Context association lists (IF context subsection 23).
///
/// Every list borrows directly into the buffer that was decoded.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextAssociationLists<'a> {
    pub source_list: &'a [u32],
    pub system_list: &'a [u32],
    pub vector_component_list: &'a [u32],
    pub async_channel_list: &'a [u32],
    /// Present iff the wire's tag-list presence bit is set; when
    /// present, has the same length as `async_channel_list`.
    pub async_channel_tag_list: Option<&'a [u32]>,
}

impl<'a> ContextAssociationLists<'a> {
    /// Total words this subsection occupies: 2 header words plus every list.
    pub fn words(&self) -> usize {
        2 + self.source_list.len()
            + self.system_list.len()
            + self.vector_component_list.len()
            + self.async_channel_list.len()
            + self.async_channel_tag_list.map_or(0, |l| l.len())
    }

    fn validate(&self) -> Result<(), VrtError> {
        if self.source_list.len() > SOURCE_SYSTEM_MASK {
            return Err(VrtError::BoundsSourceListSize);
        }
        if self.system_list.len() > SOURCE_SYSTEM_MASK {
            return Err(VrtError::BoundsSystemListSize);
        }
        if self.vector_component_list.len() > VECTOR_MASK {
            return Err(VrtError::BoundsChannelListSize);
        }
        if self.async_channel_list.len() > ASYNC_MASK {
            return Err(VrtError::BoundsChannelListSize);
        }
        if let Some(tags) = self.async_channel_tag_list {
            if tags.len() != self.async_channel_list.len() {
                return Err(VrtError::BoundsChannelListSize);
            }
        }
        Ok(())
    }

    pub fn write(&self, out: &mut [u32], validate: bool) -> Result<usize, VrtError> {
        let needed = self.words();
        if out.len() < needed {
            return Err(VrtError::BufferSize);
        }
        if validate {
            self.validate()?;
        }
        out[0] = ((self.source_list.len() as u32 & SOURCE_SYSTEM_MASK as u32) << 23)
            | ((self.system_list.len() as u32 & SOURCE_SYSTEM_MASK as u32) << 7);
        out[1] = ((self.vector_component_list.len() as u32 & VECTOR_MASK as u32) << 16)
            | if self.async_channel_tag_list.is_some() { 1 << 15 } else { 0 }
            | (self.async_channel_list.len() as u32 & ASYNC_MASK as u32);

        let mut idx = 2;
        for list in [self.source_list, self.system_list, self.vector_component_list, self.async_channel_list] {
            out[idx..idx + list.len()].copy_from_slice(list);
            idx += list.len();
        }
        if let Some(tags) = self.async_channel_tag_list {
            out[idx..idx + tags.len()].copy_from_slice(tags);
            idx += tags.len();
        }
        Ok(idx)
    }

    pub fn read(buf: &'a [u32], validate: bool) -> Result<(ContextAssociationLists<'a>, usize), VrtError> {
        if buf.len() < 2 {
            return Err(VrtError::BufferSize);
        }
        let source_len = ((buf[0] >> 23) & SOURCE_SYSTEM_MASK as u32) as usize;
        let system_len = ((buf[0] >> 7) & SOURCE_SYSTEM_MASK as u32) as usize;
        let vector_len = ((buf[1] >> 16) & VECTOR_MASK as u32) as usize;
        let tags_present = (buf[1] >> 15) & 1 != 0;
        let async_len = (buf[1] & ASYNC_MASK as u32) as usize;

        let total_lists = source_len + system_len + vector_len + async_len + if tags_present { async_len } else { 0 };
        let total = 2 + total_lists;
        if buf.len() < total {
            return Err(VrtError::BufferSize);
        }

        let mut idx = 2;
        let source_list = &buf[idx..idx + source_len];
        idx += source_len;
        let system_list = &buf[idx..idx + system_len];
        idx += system_len;
        let vector_component_list = &buf[idx..idx + vector_len];
        idx += vector_len;
        let async_channel_list = &buf[idx..idx + async_len];
        idx += async_len;
        let async_channel_tag_list = if tags_present {
            let tags = &buf[idx..idx + async_len];
            idx += async_len;
            Some(tags)
        } else {
            None
        };

        let lists = ContextAssociationLists {
            source_list,
            system_list,
            vector_component_list,
            async_channel_list,
            async_channel_tag_list,
        };
        if validate {
            lists.validate()?;
        }
        Ok((lists, idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_without_tags() {
        let sources = [1u32, 2, 3];
        let systems = [4u32];
        let lists = ContextAssociationLists {
            source_list: &sources,
            system_list: &systems,
            vector_component_list: &[],
            async_channel_list: &[],
            async_channel_tag_list: None,
        };
        let mut buf = [0u32; 6];
        let n = lists.write(&mut buf, true).unwrap();
        assert_eq!(n, 6);
        let (decoded, n2) = ContextAssociationLists::read(&buf, true).unwrap();
        assert_eq!(n2, 6);
        assert_eq!(decoded.source_list, &sources);
        assert_eq!(decoded.system_list, &systems);
        assert_eq!(decoded.async_channel_tag_list, None);
    }

    #[test]
    fn round_trips_with_tags() {
        let async_channels = [10u32, 20];
        let async_tags = [100u32, 200];
        let lists = ContextAssociationLists {
            source_list: &[],
            system_list: &[],
            vector_component_list: &[],
            async_channel_list: &async_channels,
            async_channel_tag_list: Some(&async_tags),
        };
        let mut buf = [0u32; 6];
        lists.write(&mut buf, true).unwrap();
        let (decoded, _) = ContextAssociationLists::read(&buf, true).unwrap();
        assert_eq!(decoded.async_channel_tag_list, Some(&async_tags[..]));
    }

    #[test]
    fn mismatched_tag_length_rejected() {
        let async_channels = [10u32, 20];
        let async_tags = [100u32];
        let lists = ContextAssociationLists {
            source_list: &[],
            system_list: &[],
            vector_component_list: &[],
            async_channel_list: &async_channels,
            async_channel_tag_list: Some(&async_tags),
        };
        let mut buf = [0u32; 6];
        assert_eq!(lists.write(&mut buf, true), Err(VrtError::BoundsChannelListSize));
    }
}
